//! Simulation entities whose results are reported: datacenters, hosts, VMs and cloudlets.
//!
//! The entities are produced by the simulation engine and are read-only here.
//! Placement is expressed with back-references (cloudlet -> VM -> host -> datacenter).

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Status of cloudlet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudletStatus {
    #[serde(rename = "INSTANTIATED")]
    Instantiated,
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "QUEUED")]
    Queued,
    #[serde(rename = "INEXEC")]
    InExecution,
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "CANCELED")]
    Canceled,
    #[serde(rename = "PAUSED")]
    Paused,
    #[serde(rename = "RESUMED")]
    Resumed,
    #[serde(rename = "FAILED_RESOURCE_UNAVAILABLE")]
    FailedResourceUnavailable,
}

impl CloudletStatus {
    pub fn name(&self) -> &'static str {
        match self {
            CloudletStatus::Instantiated => "INSTANTIATED",
            CloudletStatus::Ready => "READY",
            CloudletStatus::Queued => "QUEUED",
            CloudletStatus::InExecution => "INEXEC",
            CloudletStatus::Success => "SUCCESS",
            CloudletStatus::Failed => "FAILED",
            CloudletStatus::Canceled => "CANCELED",
            CloudletStatus::Paused => "PAUSED",
            CloudletStatus::Resumed => "RESUMED",
            CloudletStatus::FailedResourceUnavailable => "FAILED_RESOURCE_UNAVAILABLE",
        }
    }
}

impl Display for CloudletStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents datacenter, a group of hosts.
#[derive(Clone, Debug, PartialEq)]
pub struct Datacenter {
    pub id: u64,
}

impl Datacenter {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

/// Represents physical host.
#[derive(Clone, Debug, PartialEq)]
pub struct Host {
    pub id: u64,
    datacenter: Option<Rc<Datacenter>>,
}

impl Host {
    /// Creates host located in the given datacenter.
    pub fn new(id: u64, datacenter: Rc<Datacenter>) -> Self {
        Self {
            id,
            datacenter: Some(datacenter),
        }
    }

    /// Creates host which is not yet attached to a datacenter.
    pub fn detached(id: u64) -> Self {
        Self { id, datacenter: None }
    }

    pub fn datacenter(&self) -> Result<&Rc<Datacenter>> {
        self.datacenter
            .as_ref()
            .ok_or(TableError::DatacenterNotAssigned { host: self.id })
    }
}

/// Represents virtual machine (VM).
#[derive(Clone, Debug, PartialEq)]
pub struct Vm {
    pub id: u64,
    host: Option<Rc<Host>>,
}

impl Vm {
    /// Creates VM placed on the given host.
    pub fn new(id: u64, host: Rc<Host>) -> Self {
        Self { id, host: Some(host) }
    }

    /// Creates VM which failed to be placed on any host.
    pub fn unplaced(id: u64) -> Self {
        Self { id, host: None }
    }

    pub fn host(&self) -> Result<&Rc<Host>> {
        self.host.as_ref().ok_or(TableError::HostNotAssigned { vm: self.id })
    }
}

/// Represents cloudlet, a unit of work executed on VM.
///
/// Timing fields hold the values recorded by the simulation engine after the run,
/// all of them are in seconds of simulation time.
#[derive(Clone, Debug, PartialEq)]
pub struct Cloudlet {
    pub id: u64,
    pub status: CloudletStatus,
    /// Total length in millions of instructions (MI).
    pub length: u64,
    /// Number of requested processing elements (CPU cores).
    pub pes: u32,
    pub exec_start_time: f64,
    pub finish_time: f64,
    /// CPU time actually consumed by the cloudlet.
    pub actual_cpu_time: f64,
    vm: Option<Rc<Vm>>,
}

impl Cloudlet {
    /// Creates cloudlet with specified parameters, not yet bound to any VM.
    pub fn new(id: u64, length: u64, pes: u32) -> Self {
        Self {
            id,
            status: CloudletStatus::Instantiated,
            length,
            pes,
            exec_start_time: 0.,
            finish_time: 0.,
            actual_cpu_time: 0.,
            vm: None,
        }
    }

    pub fn with_vm(mut self, vm: Rc<Vm>) -> Self {
        self.vm = Some(vm);
        self
    }

    pub fn with_status(mut self, status: CloudletStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets execution start time, finish time and consumed CPU time.
    pub fn with_times(mut self, exec_start_time: f64, finish_time: f64, actual_cpu_time: f64) -> Self {
        self.exec_start_time = exec_start_time;
        self.finish_time = finish_time;
        self.actual_cpu_time = actual_cpu_time;
        self
    }

    pub fn vm(&self) -> Result<&Rc<Vm>> {
        self.vm.as_ref().ok_or(TableError::VmNotAssigned { cloudlet: self.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_chain() {
        let dc = Rc::new(Datacenter::new(2));
        let host = Rc::new(Host::new(5, dc));
        let vm = Rc::new(Vm::new(7, host));
        let cloudlet = Cloudlet::new(1, 100, 1).with_vm(vm);

        let vm = cloudlet.vm().unwrap();
        let host = vm.host().unwrap();
        assert_eq!(vm.id, 7);
        assert_eq!(host.id, 5);
        assert_eq!(host.datacenter().unwrap().id, 2);
    }

    #[test]
    fn test_missing_links() {
        assert!(matches!(
            Cloudlet::new(4, 100, 1).vm(),
            Err(TableError::VmNotAssigned { cloudlet: 4 })
        ));
        assert!(matches!(Vm::unplaced(3).host(), Err(TableError::HostNotAssigned { vm: 3 })));
        assert!(matches!(
            Host::detached(9).datacenter(),
            Err(TableError::DatacenterNotAssigned { host: 9 })
        ));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(CloudletStatus::InExecution.to_string(), "INEXEC");
        assert_eq!(
            CloudletStatus::FailedResourceUnavailable.name(),
            "FAILED_RESOURCE_UNAVAILABLE"
        );
        let status: CloudletStatus = serde_yaml::from_str("CANCELED").unwrap();
        assert_eq!(status, CloudletStatus::Canceled);
    }
}
