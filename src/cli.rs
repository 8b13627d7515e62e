use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "wauto")]
#[command(about = "Run C/C++ code-bases against common vulnerability checks with weggli")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single check, or `all`, against a file or directory
    Run {
        /// Which check to run
        #[arg(value_enum)]
        check: CheckId,

        /// Path to analyze (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Function name for checks that target a specific callee
        #[arg(short, long)]
        function: Option<String>,

        /// Run only high severity checks
        #[arg(long)]
        high_only: bool,
    },

    /// List the check catalog
    List {
        /// Show query text and extra arguments
        #[arg(short, long)]
        verbose: bool,
    },

    /// Verify that weggli is installed and usable
    Doctor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum CheckId {
    /// Calls to memcpy that write into a stack buffer
    Memcpy,
    /// Calls to a given function that don't check the return value
    NoReturnCheck,
    /// Potentially uninitialized pointers
    Wild,
    /// Potentially insecure uses of weak pointers
    Weak,
    /// Potentially vulnerable snprintf() uses
    Snprintf,
    /// Iterator validation
    Iter,
    /// Stack-buffer writes bounded by a function argument
    Stack,
    /// Run every check in the catalog
    All,
}

impl CheckId {
    /// Catalog id for a concrete check; `All` has no single id.
    pub fn as_check_id(self) -> Option<&'static str> {
        match self {
            CheckId::Memcpy => Some("memcpy"),
            CheckId::NoReturnCheck => Some("no-return-check"),
            CheckId::Wild => Some("wild"),
            CheckId::Weak => Some("weak"),
            CheckId::Snprintf => Some("snprintf"),
            CheckId::Iter => Some("iter"),
            CheckId::Stack => Some("stack"),
            CheckId::All => None,
        }
    }
}

#[test]
fn check_ids_resolve_in_the_catalog() {
    for id in [
        CheckId::Memcpy,
        CheckId::NoReturnCheck,
        CheckId::Wild,
        CheckId::Weak,
        CheckId::Snprintf,
        CheckId::Iter,
        CheckId::Stack,
    ] {
        let key = id.as_check_id().expect("concrete check has an id");
        assert!(
            crate::checks::find(key).is_some(),
            "CLI id '{key}' missing from catalog"
        );
    }
    assert_eq!(CheckId::All.as_check_id(), None);
}
