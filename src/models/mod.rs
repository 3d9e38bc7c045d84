pub mod account;
pub mod activity;
pub mod patterns;
pub mod labels;
pub mod report;

pub use account::*;
pub use activity::*;
pub use patterns::*;
pub use labels::*;
pub use report::*;
