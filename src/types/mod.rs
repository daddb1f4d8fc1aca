pub mod anchor_date;
pub mod outcome;
pub mod series;
pub mod session;
pub mod variable;
