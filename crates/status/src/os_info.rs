//! `OS:` line formatting from os-release contents.

/// Used when `/etc/os-release` cannot be read.
pub const DEFAULT_OS_INFO: &str = "linux/unknown";

/// Formats `{ID}/{arch}` from os-release text.
///
/// `ID` falls back to `linux` when the file has no such key.
pub fn format_os_info(os_release: &str, arch: &str) -> String {
    let id = os_release
        .lines()
        .filter_map(|line| line.trim_end().split_once('='))
        .filter(|(key, _)| *key == "ID")
        .map(|(_, value)| value.trim_matches('"'))
        .last()
        .unwrap_or("linux");
    format!("{id}/{arch}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_id() {
        let os_release = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\nBUILD_ID=rolling\n";
        assert_eq!(format_os_info(os_release, "x86_64"), "arch/x86_64");
    }

    #[test]
    fn strips_quotes() {
        assert_eq!(
            format_os_info("ID=\"fedora\"\nVERSION_ID=41\n", "aarch64"),
            "fedora/aarch64"
        );
    }

    #[test]
    fn ignores_id_like() {
        assert_eq!(
            format_os_info("ID_LIKE=debian\nID=ubuntu\n", "x86_64"),
            "ubuntu/x86_64"
        );
    }

    #[test]
    fn missing_id_falls_back_to_linux() {
        assert_eq!(format_os_info("NAME=Custom\n", "riscv64"), "linux/riscv64");
        assert_eq!(format_os_info("", "x86_64"), "linux/x86_64");
    }
}
