mod matcher;
mod parse;
mod project;
mod registration;

pub use registration::go_caps;
