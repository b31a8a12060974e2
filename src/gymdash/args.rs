use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gymdash")]
#[command(about = "Read-only terminal admin dashboard for the MyGym platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Page to fetch (1-based)
    #[arg(short, long, global = true, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(short, long, global = true, default_value_t = 50)]
    pub limit: u32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// KPI cards and a relative-size overview of each module
    #[command(alias = "d")]
    Dashboard,

    /// Recent user activity, with user names resolved
    #[command(alias = "a")]
    Activity,

    /// Daily step records, top steppers first
    Steps,

    /// Challenge participation and progress
    Challenges,

    /// The exercise library
    Exercises {
        /// Only exercises whose name contains this term
        #[arg(short, long)]
        search: Option<String>,

        /// Difficulty filter: all, beginner, intermediate, advanced, other
        #[arg(long, default_value = "all")]
        level: String,
    },

    /// Member conversations
    Conversations,

    /// Any whitelisted collection, with auto-detected columns
    #[command(alias = "ls")]
    Collections {
        /// Collection name
        name: String,
    },

    /// All store collections and their document counts
    Meta,
}
