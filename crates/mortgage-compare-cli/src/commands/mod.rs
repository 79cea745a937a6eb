pub mod amortization;
pub mod comparison;
pub mod report;
