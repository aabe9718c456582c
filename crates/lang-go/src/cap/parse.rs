use crate::GoPlugin;
use modscope_plugin::{BoxError, RegistrationParseCap, RegistrationScan};
use std::path::Path;

impl RegistrationParseCap for GoPlugin {
    fn parse_registrations(&self, source: &str, path: &Path) -> Result<RegistrationScan, BoxError> {
        let scan = self.parser.parse_registrations(source)?;
        tracing::debug!(
            path = %path.display(),
            registrations = scan.registrations.len(),
            "scanned go source"
        );
        Ok(scan)
    }
}
