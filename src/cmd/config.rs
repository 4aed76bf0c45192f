use redmark::ExtractConfig;

pub fn cmd_config(config: &ExtractConfig) {
    print!("{}", config.to_toml());
}
