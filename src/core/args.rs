use clap::Parser;
use log::kv::{ToValue, Value};

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to a TOML config file. Defaults and `VM_*` env vars apply without it.
    #[arg(short, long)]
    pub config: Option<String>,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}
