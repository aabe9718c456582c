use std::fmt::Debug;

/// Decides the service segment of a message URI. Schema generators namespace
/// messages as `<package>.<service>.<Message>`; this trait is the seam where
/// that convention lives so resolution logic never hardcodes it.
pub trait ServiceNamingConvention: Send + Sync + Debug {
    fn service_name_for_package(&self, package: &str) -> String;

    fn message_uri(&self, package: &str, message: &str) -> String {
        format!(
            "{}.{}.{}",
            package,
            self.service_name_for_package(package),
            message
        )
    }
}

/// Service name equals the package name: `moon` gives `moon.moon.MsgX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageAsService;

impl ServiceNamingConvention for PackageAsService {
    fn service_name_for_package(&self, package: &str) -> String {
        package.to_string()
    }
}

/// Service name is the last dotted segment: `test.moon` gives `test.moon.moon.MsgX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastSegmentAsService;

impl ServiceNamingConvention for LastSegmentAsService {
    fn service_name_for_package(&self, package: &str) -> String {
        package.rsplit('.').next().unwrap_or(package).to_string()
    }
}
