//! Table with execution results of cloudlets.

use std::rc::Rc;

use log::{debug, trace};

use crate::entity::Cloudlet;
use crate::error::Result;
use crate::table::{CellFormat, CellValue, TableBuilder, TextTableBuilder};

pub const DEFAULT_TITLE: &str = "SIMULATION RESULTS";

/// Builds and prints a table with one row per cloudlet: its status, placement (datacenter, host, VM),
/// length, requested cores and timing.
///
/// The table is printed with [`TextTableBuilder`] unless another builder is set with
/// [`set_printer`](Self::set_printer).
///
/// ```ignore
/// let mut table = CloudletsTableBuilder::new(&cloudlets);
/// table.set_title("Run #1");
/// let printer = table.build()?;
/// ```
pub struct CloudletsTableBuilder<'a> {
    printer: Box<dyn TableBuilder>,
    cloudlets: &'a [Rc<Cloudlet>],
}

impl<'a> CloudletsTableBuilder<'a> {
    pub fn new(cloudlets: &'a [Rc<Cloudlet>]) -> Self {
        Self {
            printer: Box::new(TextTableBuilder::new()),
            cloudlets,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.printer.set_title(title);
        self
    }

    pub fn set_printer(&mut self, printer: Box<dyn TableBuilder>) -> &mut Self {
        self.printer = printer;
        self
    }

    pub fn printer(&self) -> &dyn TableBuilder {
        self.printer.as_ref()
    }

    /// Fills the table with cloudlet data and prints it.
    ///
    /// Returns the printer so that the table can be inspected or rendered again.
    /// Fails if some cloudlet is not bound to a VM, or its VM is not placed on a host,
    /// or the host does not belong to a datacenter. Nothing is printed in this case.
    pub fn build(mut self) -> Result<Box<dyn TableBuilder>> {
        if self.printer.title().is_empty() {
            self.printer.set_title(DEFAULT_TITLE);
        }
        if self.cloudlets.is_empty() {
            debug!("no cloudlets to report, printing header only");
        }
        debug!(
            "building table \"{}\" for {} cloudlets",
            self.printer.title(),
            self.cloudlets.len()
        );

        self.create_columns();
        for cloudlet in self.cloudlets {
            let values = Self::row_values(cloudlet)?;
            trace!("cloudlet {}: {:?}", cloudlet.id, values);
            self.printer.new_row().extend(values);
        }
        self.printer.print()?;
        Ok(self.printer)
    }

    fn create_columns(&mut self) {
        let printer = self.printer.as_mut();
        printer.add_column("Cloudlet").set_subtitle("ID");
        printer.add_column("Status");
        printer.add_column("DC").set_subtitle("ID");
        printer.add_column("Host").set_subtitle("ID");
        printer.add_column("VM").set_subtitle("ID");
        printer.add_column("CloudletLen").set_subtitle("MI");
        printer.add_column("CloudletPEs").set_subtitle("CPU cores");
        printer
            .add_column("StartTime")
            .set_format(CellFormat::Integer)
            .set_subtitle("Seconds");
        printer
            .add_column("FinishTime")
            .set_format(CellFormat::Integer)
            .set_subtitle("Seconds");
        printer
            .add_column("ExecTime")
            .set_format(CellFormat::Fixed(0))
            .set_subtitle("Seconds");
    }

    /// Values of a table row for the given cloudlet, in column order.
    pub fn row_values(cloudlet: &Cloudlet) -> Result<Vec<CellValue>> {
        let vm = cloudlet.vm()?;
        let host = vm.host()?;
        let datacenter = host.datacenter()?;

        Ok(vec![
            cloudlet.id.into(),
            cloudlet.status.name().into(),
            datacenter.id.into(),
            host.id.into(),
            vm.id.into(),
            cloudlet.length.into(),
            cloudlet.pes.into(),
            (cloudlet.exec_start_time.trunc() as i64).into(),
            (cloudlet.finish_time.trunc() as i64).into(),
            cloudlet.actual_cpu_time.into(),
        ])
    }
}
