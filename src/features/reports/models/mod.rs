mod report;

pub use report::{AdminNote, Category, Coordinates, Priority, Report, ReportStatus};

#[cfg(test)]
pub use report::{Location, PersonRef, ReportImage};
