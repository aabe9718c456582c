mod matcher;
mod parse;
mod registration;

pub use registration::proto_caps;
