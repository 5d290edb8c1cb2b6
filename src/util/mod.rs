pub mod toml_value;
