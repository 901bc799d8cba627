use clap::{Args, Parser, Subcommand, ValueEnum};

use dkg_client::client::DEFAULT_SEARCH_LIMIT;
use dkg_client::models::RelationDirection;
use dkg_client::render::OutputFormat;

/// dkg: ground text, look up entities and query relations in a domain knowledge graph
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Client for a domain knowledge graph REST service"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Service base URL (overrides DKG_REST_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short, global = true, default_value = "text")]
    pub format: FormatArg,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ground free text to ontology terms
    Ground {
        /// Text to ground (e.g., "infected population")
        text: String,

        /// Restrict matches to these ontology prefixes
        #[arg(long = "namespace", short)]
        namespaces: Vec<String>,
    },

    /// Show the full record of an entity
    Entity {
        /// Compact URI of the entity (e.g., ido:0000511)
        curie: String,
    },

    /// Query relations ending at a target entity
    Relations {
        /// CURIE of the target entity (e.g., ncbitaxon:10090)
        target: String,

        /// Relation type CURIE to filter by; repeat for several
        #[arg(long = "relation", short)]
        relations: Vec<String>,

        /// Only relations starting at this CURIE
        #[arg(long)]
        source: Option<String>,

        /// Direction of the relation
        #[arg(long, short)]
        direction: Option<DirectionArg>,

        /// Maximum number of triples to return
        #[arg(long, short)]
        limit: Option<u32>,

        /// Maximum path length; 0 means unbounded
        #[arg(long)]
        max_hops: Option<u32>,

        /// Ask the service to drop repeated triples
        #[arg(long)]
        distinct: bool,

        /// Return full entity records for subject and object
        #[arg(long)]
        full: bool,
    },

    /// Search entity names and synonyms
    Search {
        text: String,

        #[arg(long, short, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,

        #[arg(long, default_value = "0")]
        offset: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DirectionArg {
    Right,
    Left,
    Both,
}

impl From<DirectionArg> for RelationDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Right => RelationDirection::Right,
            DirectionArg::Left => RelationDirection::Left,
            DirectionArg::Both => RelationDirection::Both,
        }
    }
}
