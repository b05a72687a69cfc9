use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use ens_normalize::{shared, EnsNormalizer};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode
{
    Normalize,
    Beautify,
    Fragment,
    FragmentNfd,
    Split,
}

fn usage(program: &str) -> !
{
    eprintln!(
        "Usage: {} [--beautify | --fragment | --nfd | --split] [<name>...]",
        program
    );
    eprintln!("  names are read from stdin, one per line, when none are given");
    eprintln!("  the tables are embedded at build time from $ENS_NORMALIZE_DATA_DIR (default: data/)");
    process::exit(2);
}

/// writes the result of one name, false on failure
fn run(
    normalizer: &EnsNormalizer,
    mode: Mode,
    name: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool>
{
    let result = match mode {
        Mode::Normalize => normalizer.normalize(name),
        Mode::Beautify => normalizer.beautify(name),
        Mode::Fragment => normalizer.normalize_fragment(name, false),
        Mode::FragmentNfd => normalizer.normalize_fragment(name, true),
        Mode::Split => {
            let labels = normalizer.split(name);

            for label in labels.iter() {
                match &label.result {
                    Ok(valid) => writeln!(
                        out,
                        "{}\t{}\t{}{}",
                        label.input,
                        valid.output,
                        valid.group,
                        match valid.emoji {
                            true => "\temoji",
                            false => "",
                        }
                    )?,
                    Err(error) => writeln!(out, "{}\terror: {}", label.input, error)?,
                }
            }

            return Ok(labels.iter().all(|label| label.result.is_ok()));
        }
    };

    match result {
        Ok(output) => {
            writeln!(out, "{}", output)?;
            Ok(true)
        }
        Err(error) => {
            writeln!(err, "ERROR: {}", error)?;
            Ok(false)
        }
    }
}

fn main()
{
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ens-normalize");

    let mut mode = Mode::Normalize;
    let mut names = vec![];

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--beautify" => mode = Mode::Beautify,
            "--fragment" => mode = Mode::Fragment,
            "--nfd" => mode = Mode::FragmentNfd,
            "--split" => mode = Mode::Split,
            "-h" | "--help" => usage(program),
            flag if flag.starts_with("--") => {
                eprintln!("ERROR: unknown option {}", flag);
                usage(program);
            }
            name => names.push(name.to_owned()),
        }
    }

    let normalizer = shared();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let mut ok = true;

    let mut each = |name: &str| match run(normalizer, mode, name, &mut out, &mut err) {
        Ok(done) => ok &= done,
        Err(error) => {
            eprintln!("ERROR: failed to write output: {}", error);
            process::exit(1);
        }
    };

    match names.is_empty() {
        true => {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => each(&line),
                    Err(error) => {
                        eprintln!("ERROR: failed to read stdin: {}", error);
                        process::exit(1);
                    }
                }
            }
        }
        false => {
            for name in names.iter() {
                each(name);
            }
        }
    }

    if !ok {
        process::exit(1);
    }
}

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod common;

#[cfg(test)]
mod tests
{
    use super::*;

    fn output(mode: Mode, name: &str) -> (bool, String, String)
    {
        let normalizer = common::normalizer();
        let mut out = vec![];
        let mut err = vec![];

        let ok = run(&normalizer, mode, name, &mut out, &mut err).unwrap();

        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn modes()
    {
        assert_eq!(output(Mode::Normalize, "Nick.ETH"), (true, "nick.eth\n".to_owned(), String::new()));
        assert_eq!(
            output(Mode::Beautify, "\u{2764}"),
            (true, "\u{2764}\u{FE0F}\n".to_owned(), String::new())
        );
        assert_eq!(output(Mode::Fragment, "ab_c"), (true, "ab_c\n".to_owned(), String::new()));
        assert_eq!(
            output(Mode::FragmentNfd, "\u{E9}"),
            (true, "e\u{301}\n".to_owned(), String::new())
        );
    }

    #[test]
    fn failures_go_to_stderr()
    {
        let (ok, out, err) = output(Mode::Normalize, "ab_c");

        assert!(!ok);
        assert!(out.is_empty());
        assert!(err.starts_with("ERROR: invalid label"));
    }

    #[test]
    fn split_lists_every_label()
    {
        let (ok, out, err) = output(Mode::Split, "Nick.ab_c.\u{1F44D}");
        let lines: Vec<&str> = out.lines().collect();

        assert!(!ok);
        assert!(err.is_empty());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Nick\tnick\tASCII");
        assert!(lines[1].starts_with("ab_c\terror: "));
        assert_eq!(lines[2], "\u{1F44D}\t\u{1F44D}\tEmoji\temoji");
    }
}
