pub mod mfd;
pub mod run;
pub mod template;
