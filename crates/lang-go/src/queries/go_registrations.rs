modscope_plugin::decl_indices!(RegistrationIndices, {
    method => "method",
    args => "args",
});

pub const GO_REGISTRATIONS_SCM: &str = include_str!("go_registrations.scm");
