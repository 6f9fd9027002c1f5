use netbird_manager_status::{DEFAULT_OS_INFO, format_os_info};

/// Returns the `{distro}/{arch}` string shown on the status `OS:` line.
///
/// Falls back to `linux/unknown` when `/etc/os-release` is unreadable.
pub fn detect_os_info() -> String {
    match std::fs::read_to_string("/etc/os-release") {
        Ok(content) => format_os_info(&content, std::env::consts::ARCH),
        Err(e) => {
            tracing::debug!("cannot read /etc/os-release: {e}");
            DEFAULT_OS_INFO.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_info_has_distro_and_arch() {
        let info = detect_os_info();
        let (distro, arch) = info.split_once('/').unwrap();
        assert!(!distro.is_empty());
        assert!(!arch.is_empty());
    }
}
