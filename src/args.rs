use catalog_harvest::SchemaPolicy;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(about = "Harvests a paginated product catalog into a delimited table")]
#[command(version)]
pub struct Args {
    /// Catalog listing URL to harvest
    pub catalog_url: String,

    /// Base URL prepended to relative detail links (defaults to the catalog
    /// URL's origin)
    #[arg(long)]
    pub detail_base_url: Option<String>,

    /// Number of detail pages fetched concurrently
    #[arg(short, long, default_value_t = 20)]
    pub concurrency: usize,

    /// Output file path
    #[arg(short, long, default_value = "products.csv")]
    pub output: String,

    /// WebDriver endpoint
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// How records with differing field sets are reconciled
    #[arg(long, value_enum, default_value_t = SchemaPolicyArg::Lenient)]
    pub schema_policy: SchemaPolicyArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemaPolicyArg {
    /// Union columns across records, empty-filling missing cells
    Lenient,
    /// Fail when a record's fields differ from the first record's
    Strict,
}

/// Convert from CLI argument schema policy to internal schema policy
pub fn convert_schema_policy(arg: SchemaPolicyArg) -> SchemaPolicy {
    match arg {
        SchemaPolicyArg::Lenient => SchemaPolicy::Lenient,
        SchemaPolicyArg::Strict => SchemaPolicy::Strict,
    }
}
