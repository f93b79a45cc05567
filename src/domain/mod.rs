pub mod analysis;
pub mod audit;
pub mod brand;
pub mod persona;
pub mod question;
pub mod report;
pub mod study;
pub mod topic;
