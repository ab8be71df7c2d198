pub mod blacklist;
pub mod check_log;
pub mod preview;
