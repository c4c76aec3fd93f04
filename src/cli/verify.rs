//! `subsheet verify`: check the published Data Page against the key.

use anyhow::{Result, bail};

use crate::config::SheetConfig;
use crate::log;
use crate::remote::RemoteHost;
use crate::state::{DataKey, parse_data_page};
use crate::utils::plural::plural_count;

pub fn verify_sheet(config: &SheetConfig, host: &dyn RemoteHost, key: &DataKey) -> Result<()> {
    let name = &config.target.data_page;
    let Some(page) = host.read_page(name)? else {
        bail!("data page `{name}` does not exist");
    };

    match parse_data_page(&page, key) {
        Some(stored) => {
            let count = plural_count(stored.len(), "image");
            log!("verify"; "data page `{}` verifies, {} stored", name, count);
            Ok(())
        }
        None => bail!("data page `{name}` does not verify under the given key"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::remote::DirectoryHost;
    use crate::state::{SheetState, render_data_page};
    use crate::utils::date::DateTimeUtc;
    use tempfile::TempDir;

    #[test]
    fn test_verify_missing_page() {
        let dir = TempDir::new().unwrap();
        let host = DirectoryHost::new(dir.path());
        let config = test_parse_config("");

        let err = verify_sheet(&config, &host, &DataKey::new("k").unwrap()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_verify_signed_and_tampered_page() {
        let dir = TempDir::new().unwrap();
        let host = DirectoryHost::new(dir.path());
        let config = test_parse_config("");
        let key = DataKey::new("k").unwrap();

        let state = SheetState::new("test_site", "stylesheet.css", "stylesheet/data", "note");
        let page = render_data_page(&state, &key, DateTimeUtc::new(2024, 1, 2, 3, 4, 5));
        host.write_page("stylesheet/data", &page, "note").unwrap();
        verify_sheet(&config, &host, &key).unwrap();

        host.write_page("stylesheet/data", &page.replacen("note", "edit", 1), "tamper")
            .unwrap();
        assert!(verify_sheet(&config, &host, &key).is_err());
    }
}
