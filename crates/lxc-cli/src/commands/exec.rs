use anyhow::Result;
use lxc::Lxc;

/// Print the tool's stdout; on failure its captured output goes to stderr first.
///
/// A quoted line with no further arguments, such as `exec "ls --active"`, is split on
/// whitespace.
pub async fn run(lxc: &Lxc, subcommand: &str, args: Vec<String>) -> Result<()> {
    let result = if args.is_empty() {
        lxc.exec_line(subcommand).await
    } else {
        lxc.exec(subcommand, args).await
    };

    match result {
        Ok(stdout) => {
            print!("{}", stdout);
            Ok(())
        }
        Err(e) => {
            if let Some(output) = e.captured_output().filter(|o| !o.is_empty()) {
                eprint!("{}", output);
            }
            Err(e.into())
        }
    }
}
