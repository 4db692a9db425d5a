use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ugh::prefs::{FileFormat, TypeKind};

#[derive(Parser, Debug)]
#[command(
    name = "ugh",
    bin_name = "ugh",
    version,
    disable_help_subcommand = true,
    about = "Inspect rulesets, check metadata documents and verify backups",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ruleset file (JSON or YAML); overrides UGH_RULESET and ugh.toml
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub ruleset: Option<PathBuf>,

    /// Directory holding the project ugh.toml [default: current directory]
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the types declared by the ruleset
    Types {
        /// Only list one kind of type
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Load a document and validate it against the ruleset
    Check {
        /// Document file (.json, .yaml, .yml)
        document: PathBuf,
    },

    /// Print the file set of a document
    Files {
        /// Document file (.json, .yaml, .yml)
        document: PathBuf,
    },

    /// Print an empty document of a structure type with its required entries
    Scaffold {
        /// Structure type name, e.g. Monograph
        #[arg(value_name = "TYPE")]
        type_name: String,

        #[arg(long, value_enum, default_value_t = FormatArg::Yaml)]
        format: FormatArg,
    },

    /// Verify the metadata backups of processes
    Backup {
        /// Metadata folder [default: UGH_METADATA_FOLDER / metadata_folder]
        #[arg(long, value_name = "DIR")]
        folder: Option<PathBuf>,

        /// Process ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show the resolved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a commented ugh.toml template
    Gen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Metadata,
    Groups,
    Structs,
}

impl From<KindArg> for TypeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Metadata => TypeKind::Metadata,
            KindArg::Groups => TypeKind::Group,
            KindArg::Structs => TypeKind::DocStruct,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for FileFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => FileFormat::Yaml,
            FormatArg::Json => FileFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["ugh", "types", "--kind", "groups", "--ruleset", "r.yaml", "-v"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.ruleset, Some(PathBuf::from("r.yaml")));
        match cli.command {
            Commands::Types { kind } => assert_eq!(kind, Some(KindArg::Groups)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn backup_requires_ids() {
        assert!(Cli::try_parse_from(["ugh", "backup"]).is_err());
        let cli = Cli::try_parse_from(["ugh", "backup", "--folder", "/m", "1", "2"]).unwrap();
        match cli.command {
            Commands::Backup { folder, ids } => {
                assert_eq!(folder, Some(PathBuf::from("/m")));
                assert_eq!(ids, vec!["1", "2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn scaffold_defaults_to_yaml() {
        let cli = Cli::try_parse_from(["ugh", "scaffold", "Monograph"]).unwrap();
        match cli.command {
            Commands::Scaffold { type_name, format } => {
                assert_eq!(type_name, "Monograph");
                assert_eq!(FileFormat::from(format), FileFormat::Yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn kind_maps_to_type_kind() {
        assert_eq!(TypeKind::from(KindArg::Structs), TypeKind::DocStruct);
    }
}
