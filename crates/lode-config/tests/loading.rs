//! Layered override loading: config file, then environment.

use figment::Jail;
use lode_config::{BuildContext, Command, ConfigError, EntryStrategy, OverridesLoader, plan};

#[test]
fn loads_json_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "lode.config.json",
            r#"{
                "client": { "outDir": "client-dist" },
                "build": { "assetsDir": "static" },
                "debug": true
            }"#,
        )?;

        let overrides = OverridesLoader::new(jail.directory()).load().unwrap();
        assert_eq!(overrides.client.out_dir.as_deref(), Some("client-dist"));
        assert_eq!(overrides.build.assets_dir.as_deref(), Some("static"));
        assert!(overrides.debug);
        Ok(())
    });
}

#[test]
fn loads_toml_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "lode.toml",
            r#"
target = "lib"
srcDir = "source"

[build.lib]
entry = "./source/main.ts"

[entryStrategy]
type = "inline"
"#,
        )?;

        let overrides = OverridesLoader::new(jail.directory()).load().unwrap();
        let config = plan(&BuildContext::new("/project"), Command::Build, "", &overrides);

        assert_eq!(config.entry_strategy, EntryStrategy::Inline);
        assert_eq!(config.input, vec!["/project/source/main.ts".to_string()]);
        assert_eq!(config.out_dir, "/project/lib");
        Ok(())
    });
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("lode.config.json", r#"{ "build": { "outDir": "from-file" } }"#)?;
        jail.set_env("LODE_BUILD__OUT_DIR", "from-env");
        jail.set_env("LODE_BUILD__ASSETS_DIR", "static");

        let overrides = OverridesLoader::new(jail.directory()).load().unwrap();
        assert_eq!(overrides.build.out_dir.as_deref(), Some("from-env"));
        assert_eq!(overrides.build.assets_dir.as_deref(), Some("static"));
        Ok(())
    });
}

#[test]
fn numeric_looking_env_values_stay_strings() {
    Jail::expect_with(|jail| {
        jail.set_env("LODE_BUILD__OUT_DIR", "2024");
        jail.set_env("LODE_BUILD__ASSETS_DIR", "1");

        let overrides = OverridesLoader::new(jail.directory()).load().unwrap();
        assert_eq!(overrides.build.out_dir.as_deref(), Some("2024"));
        assert_eq!(overrides.build.assets_dir.as_deref(), Some("1"));

        let config = plan(&BuildContext::new("/project"), Command::Build, "production", &overrides);
        assert_eq!(config.out_dir, "/project/2024");
        Ok(())
    });
}

#[test]
fn environment_alone_is_enough() {
    Jail::expect_with(|jail| {
        jail.set_env("LODE_DEBUG", "true");
        jail.set_env("LODE_ENTRY_STRATEGY__TYPE", "single");
        jail.set_env("LODE_CLIENT__DEV_INPUT", "src/dev.tsx");

        let overrides = OverridesLoader::new(jail.directory()).load().unwrap();
        assert!(overrides.debug);
        assert_eq!(overrides.entry_strategy, Some(EntryStrategy::Single));
        assert_eq!(overrides.client.dev_input.as_deref(), Some("src/dev.tsx"));
        Ok(())
    });
}

#[test]
fn custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("LODE_DEBUG", "true");
        jail.set_env("APP_BASE", "/docs/");

        let overrides = OverridesLoader::new(jail.directory())
            .with_env_prefix("APP_")
            .load()
            .unwrap();
        assert!(!overrides.debug);
        assert_eq!(overrides.base.as_deref(), Some("/docs/"));
        Ok(())
    });
}

#[test]
fn explicit_config_file_is_used() {
    Jail::expect_with(|jail| {
        jail.create_file("lode.config.json", r#"{ "debug": false }"#)?;
        jail.create_file("ci.toml", "debug = true\n")?;

        let overrides = OverridesLoader::new(jail.directory())
            .with_config_file("ci.toml")
            .load()
            .unwrap();
        assert!(overrides.debug);
        Ok(())
    });
}

#[test]
fn malformed_file_is_an_extract_error() {
    Jail::expect_with(|jail| {
        jail.create_file("lode.config.json", r#"{ "debug": "#)?;

        let err = OverridesLoader::new(jail.directory()).load().unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
        Ok(())
    });
}
