//! Simulation results loaded from YAML file.

use std::collections::HashMap;
use std::rc::Rc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::entity::{Cloudlet, CloudletStatus, Datacenter, Host, Vm};
use crate::error::{Result, TableError};
use crate::table::TableFormat;

/// Holds raw scenario parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawScenario {
    pub title: Option<String>,
    pub format: Option<TableFormat>,
    pub datacenters: Option<Vec<DatacenterConfig>>,
    pub hosts: Option<Vec<HostConfig>>,
    pub vms: Option<Vec<VmConfig>>,
    pub cloudlets: Option<Vec<RawCloudletConfig>>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawCloudletConfig {
    pub id: u64,
    pub status: Option<CloudletStatus>,
    pub vm: Option<u64>,
    pub length: u64,
    pub pes: Option<u32>,
    pub start_time: Option<f64>,
    pub finish_time: Option<f64>,
    pub cpu_time: Option<f64>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DatacenterConfig {
    pub id: u64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct HostConfig {
    pub id: u64,
    /// Datacenter ID, host is detached if not set.
    pub datacenter: Option<u64>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct VmConfig {
    pub id: u64,
    /// Host ID, VM is not placed if not set.
    pub host: Option<u64>,
}

/// Holds final state of a single cloudlet.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CloudletConfig {
    pub id: u64,
    pub status: CloudletStatus,
    /// VM ID, cloudlet is not bound to VM if not set.
    pub vm: Option<u64>,
    /// Length in MI.
    pub length: u64,
    /// Number of requested cores.
    pub pes: u32,
    pub start_time: f64,
    pub finish_time: f64,
    pub cpu_time: f64,
}

/// Represents results of a finished simulation: entities and the report settings.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Scenario {
    /// Table title, the default one is used if not set.
    pub title: Option<String>,
    pub format: TableFormat,
    pub datacenters: Vec<DatacenterConfig>,
    pub hosts: Vec<HostConfig>,
    pub vms: Vec<VmConfig>,
    pub cloudlets: Vec<CloudletConfig>,
}

impl Scenario {
    /// Reads scenario from YAML file (uses default values if some fields are absent).
    pub fn from_file(file_name: &str) -> Result<Self> {
        let text = std::fs::read_to_string(file_name).map_err(|source| TableError::ReadFile {
            path: file_name.to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let raw: RawScenario = serde_yaml::from_str(text)?;

        Ok(Self {
            title: raw.title,
            format: raw.format.unwrap_or_default(),
            datacenters: raw.datacenters.unwrap_or_default(),
            hosts: raw.hosts.unwrap_or_default(),
            vms: raw.vms.unwrap_or_default(),
            cloudlets: raw
                .cloudlets
                .unwrap_or_default()
                .into_iter()
                .map(|c| CloudletConfig {
                    id: c.id,
                    status: c.status.unwrap_or(CloudletStatus::Success),
                    vm: c.vm,
                    length: c.length,
                    pes: c.pes.unwrap_or(1),
                    start_time: c.start_time.unwrap_or(0.),
                    finish_time: c.finish_time.unwrap_or(0.),
                    cpu_time: c.cpu_time.unwrap_or(0.),
                })
                .collect(),
        })
    }

    /// Creates entities linked with each other and returns cloudlets in the scenario order.
    pub fn resolve(&self) -> Result<Vec<Rc<Cloudlet>>> {
        let mut datacenters = HashMap::new();
        for dc in &self.datacenters {
            if datacenters.insert(dc.id, Rc::new(Datacenter::new(dc.id))).is_some() {
                warn!("datacenter {} is defined more than once", dc.id);
            }
        }

        let mut hosts = HashMap::new();
        for host in &self.hosts {
            let resolved = match host.datacenter {
                Some(dc_id) => {
                    let dc = lookup(&datacenters, "datacenter", dc_id, || format!("host {}", host.id))?;
                    Host::new(host.id, dc)
                }
                None => Host::detached(host.id),
            };
            if hosts.insert(host.id, Rc::new(resolved)).is_some() {
                warn!("host {} is defined more than once", host.id);
            }
        }

        let mut vms = HashMap::new();
        for vm in &self.vms {
            let resolved = match vm.host {
                Some(host_id) => Vm::new(vm.id, lookup(&hosts, "host", host_id, || format!("VM {}", vm.id))?),
                None => Vm::unplaced(vm.id),
            };
            if vms.insert(vm.id, Rc::new(resolved)).is_some() {
                warn!("VM {} is defined more than once", vm.id);
            }
        }

        let mut cloudlets = Vec::with_capacity(self.cloudlets.len());
        for c in &self.cloudlets {
            let mut cloudlet = Cloudlet::new(c.id, c.length, c.pes)
                .with_status(c.status)
                .with_times(c.start_time, c.finish_time, c.cpu_time);
            if let Some(vm_id) = c.vm {
                cloudlet = cloudlet.with_vm(lookup(&vms, "VM", vm_id, || format!("cloudlet {}", c.id))?);
            }
            cloudlets.push(Rc::new(cloudlet));
        }
        Ok(cloudlets)
    }
}

fn lookup<T>(
    entities: &HashMap<u64, Rc<T>>,
    kind: &'static str,
    id: u64,
    referrer: impl FnOnce() -> String,
) -> Result<Rc<T>> {
    entities.get(&id).cloned().ok_or_else(|| TableError::UnknownReference {
        kind,
        id,
        referrer: referrer(),
    })
}
