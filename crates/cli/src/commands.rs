use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a condition file and print it in normalized form
    Validate {
        #[arg(help = "Condition file (JSON)")]
        condition: String,
    },
    /// Compile a condition into a parameterized read query
    Compile {
        #[arg(help = "Condition file (JSON)")]
        condition: String,

        #[arg(long, default_value = "nodes", help = "Entity kind: nodes or edges")]
        target: String,

        #[arg(long, help = "Identifier strategy: dynamic-key or inline")]
        strategy: Option<String>,
    },
    /// Filter an in-memory graph and print the consolidated result
    Filter {
        #[arg(help = "Graph document (JSON)")]
        graph: String,

        #[arg(long, help = "Node condition file (JSON)")]
        nodes: Option<String>,

        #[arg(long, help = "Edge condition file (JSON)")]
        edges: Option<String>,

        #[arg(long, help = "Add stub nodes for edge endpoints outside the result")]
        include_subsidiary: bool,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Deduplicate a raw result and close it over its edges
    Consolidate {
        #[arg(help = "Raw result file (JSON)")]
        result: String,

        #[arg(long, help = "Add stub nodes for edge endpoints outside the result")]
        include_subsidiary: bool,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
}
