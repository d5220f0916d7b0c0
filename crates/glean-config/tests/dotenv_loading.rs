//! `.env` support. Kept in its own test binary: variables loaded by
//! `dotenvy` stay in the process environment.

use figment::Jail;
use glean_config::GleanConfig;
use pretty_assertions::assert_eq;

#[test]
fn dotenv_in_working_directory_feeds_the_env_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "GLEAN_EXTRACTION__MERGE_BLANK_LINES=2\n")?;
        jail.create_dir(".glean")?;
        jail.create_file(".glean/config.toml", "[extraction]\nmerge_blank_lines = 1\n")?;

        let config = GleanConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.extraction.merge_blank_lines, 2);
        Ok(())
    });
}
