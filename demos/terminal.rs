use std::fs::read_to_string;
use std::process::exit;

use console::Style;
use resemble::text::TextDiffer;
use resemble::DiffAction;

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    if args.len() != 3 {
        eprintln!("usage: terminal [old] [new]");
        exit(1);
    }

    let old = read_to_string(&args[1]).unwrap();
    let new = read_to_string(&args[2]).unwrap();

    let mut differ = TextDiffer::new();
    for line in differ.diff_text(old.as_str(), new.as_str()) {
        let (sign, style) = match line.action() {
            DiffAction::Removed => ("-", Style::new().red()),
            DiffAction::Added => ("+", Style::new().green()),
            DiffAction::Equal => (" ", Style::new()),
        };
        let words = line.value();
        let changed = words.iter().any(|w| w.action() != DiffAction::Equal);
        let sign = if line.action() == DiffAction::Equal && changed {
            "~"
        } else {
            sign
        };
        print!("{}", style.apply_to(sign).bold());
        for word in words {
            match word.action() {
                DiffAction::Removed if changed && line.action() == DiffAction::Equal => {
                    print!("{}", Style::new().red().underlined().apply_to(word.value()))
                }
                DiffAction::Added if changed && line.action() == DiffAction::Equal => {
                    print!("{}", Style::new().green().underlined().apply_to(word.value()))
                }
                _ => print!("{}", style.apply_to(word.value())),
            }
        }
        println!();
    }
}
