//! Library integration tests.

use parexec::ParexecError;

#[test]
fn error_types_are_public() {
    let err = ParexecError::CommandFailed {
        command: "false".into(),
        code: Some(1),
    };
    assert!(err.to_string().contains("false"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> parexec::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use parexec::cli::{Cli, Commands};

    let cli = Cli::parse_from(["parexec", "list", "--json"]);

    if let Some(Commands::List(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected List command");
    }
}
