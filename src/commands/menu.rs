use crate::services::render;
use crate::store::Catalog;
use std::io::{BufRead, Write};

const QUIT_WORDS: [&str; 3] = ["!q", "quit", "exit"];
const BACK_WORDS: [&str; 4] = ["!b", "back", "return", "menu"];
const ACCESS_WORDS: [&str; 4] = ["a", "access", "view", "open"];
const INVENTORY_WORDS: [&str; 5] = ["i", "inventory", "list", "show", "browse"];
const SEARCH_WORDS: [&str; 3] = ["s", "search", "find"];

/// Tri-state result of one prompt: plain input, back-to-menu, or quit.
/// Every nested flow consumes this instead of threading sentinel strings.
#[derive(Debug, PartialEq, Eq)]
enum Signal {
    Line(String),
    Back,
    Quit,
}

/// Where a sub-flow hands control after it finishes.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Menu,
    Quit,
}

fn classify(raw: &str) -> Signal {
    let word = raw.trim().to_ascii_lowercase();
    if QUIT_WORDS.contains(&word.as_str()) {
        Signal::Quit
    } else if BACK_WORDS.contains(&word.as_str()) {
        Signal::Back
    } else {
        Signal::Line(raw.trim().to_string())
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> anyhow::Result<Signal> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    // EOF ends the session like a quit word.
    if input.read_line(&mut line)? == 0 {
        return Ok(Signal::Quit);
    }
    Ok(classify(&line))
}

/// Interactive menu loop. Query errors (bad ids, empty results) are
/// reported inline; only quit words or EOF end the session.
pub fn run_menu<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        banner(out, catalog.len())?;
        let command = match prompt(input, out, "\nEnter command: ")? {
            Signal::Quit => break,
            Signal::Back => continue,
            Signal::Line(l) => l.to_ascii_lowercase(),
        };
        let flow = if ACCESS_WORDS.contains(&command.as_str()) {
            access_flow(catalog, input, out)?
        } else if INVENTORY_WORDS.contains(&command.as_str()) {
            inventory_flow(catalog, input, out)?
        } else if SEARCH_WORDS.contains(&command.as_str()) {
            search_flow(catalog, input, out)?
        } else {
            writeln!(out, "Invalid command. Please try again.")?;
            Flow::Menu
        };
        if flow == Flow::Quit {
            break;
        }
    }
    writeln!(out, "Thank you for visiting the library. Goodbye!")?;
    Ok(())
}

fn banner<W: Write>(out: &mut W, count: usize) -> anyhow::Result<()> {
    writeln!(out, "\n==================================================")?;
    writeln!(out, "Welcome to the library catalog.")?;
    writeln!(out, "==================================================")?;
    writeln!(out, "\nLoaded {} items.", count)?;
    writeln!(out, "\nCommands:")?;
    writeln!(out, "  a/access    - View item details")?;
    writeln!(out, "  i/inventory - Browse the inventory")?;
    writeln!(out, "  s/search    - Search the catalog")?;
    writeln!(out, "  !b/back     - Back to main menu")?;
    writeln!(out, "  !q/quit     - Exit")?;
    Ok(())
}

fn access_flow<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Flow> {
    let all: Vec<_> = catalog.list(None).collect();
    render::inventory(out, &all)?;
    match prompt(input, out, "\nEnter item id to view details: ")? {
        Signal::Quit => Ok(Flow::Quit),
        Signal::Back => Ok(Flow::Menu),
        Signal::Line(id) => {
            show_entry(catalog, out, &id)?;
            Ok(Flow::Menu)
        }
    }
}

fn inventory_flow<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Flow> {
    writeln!(out, "\nAvailable types: {}", catalog.types().join(", "))?;
    writeln!(out, "Available topics: {}", topics_line(&catalog.topics()))?;
    let filter = match prompt(input, out, "\nFilter by type (or press Enter for all): ")? {
        Signal::Quit => return Ok(Flow::Quit),
        Signal::Back => return Ok(Flow::Menu),
        Signal::Line(f) if f.is_empty() => None,
        Signal::Line(f) => Some(f),
    };
    let entries: Vec<_> = catalog.list(filter.as_deref()).collect();
    render::inventory(out, &entries)?;
    match prompt(input, out, "\nPress Enter to return to the menu... ")? {
        Signal::Quit => Ok(Flow::Quit),
        _ => Ok(Flow::Menu),
    }
}

fn search_flow<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Flow> {
    loop {
        writeln!(out, "\nAvailable topics: {}", topics_line(&catalog.topics()))?;
        let query = match prompt(input, out, "Enter search term (title, author, or topic): ")? {
            Signal::Quit => return Ok(Flow::Quit),
            Signal::Back => return Ok(Flow::Menu),
            Signal::Line(q) => q,
        };
        let hits: Vec<_> = catalog.search(&query).collect();
        render::search_results(out, &query, &hits)?;
        let answer = match prompt(input, out, "Did you find what you were looking for? (yes/no): ")?
        {
            Signal::Quit => return Ok(Flow::Quit),
            Signal::Back => return Ok(Flow::Menu),
            Signal::Line(a) => a.to_ascii_lowercase(),
        };
        match answer.as_str() {
            "yes" | "y" => {
                match prompt(input, out, "Enter the id of the item to access: ")? {
                    Signal::Quit => return Ok(Flow::Quit),
                    Signal::Back => return Ok(Flow::Menu),
                    Signal::Line(id) => show_entry(catalog, out, &id)?,
                }
                // A successful access returns to the menu, same as from
                // the main-menu access command.
                return Ok(Flow::Menu);
            }
            "no" | "n" => continue,
            _ => {
                writeln!(out, "Invalid input. Returning to main menu.")?;
                return Ok(Flow::Menu);
            }
        }
    }
}

fn show_entry<W: Write>(catalog: &Catalog, out: &mut W, raw_id: &str) -> anyhow::Result<()> {
    match catalog.get(raw_id) {
        Ok((entry, free_download)) => render::detail(out, entry, free_download)?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(())
}

fn topics_line(topics: &[&str]) -> String {
    if topics.len() > 10 {
        format!("{}...", topics[..10].join(", "))
    } else {
        topics.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Catalog;
    use std::fs;
    use std::io::Write as _;
    use tempfile::TempDir;

    const FIXTURE: &str = "\
Title,Subtitle,Author 1,Author 2,Author 3,Author 4,Author 5,Type,Format,Topic,Publisher,Year,Free Download
Clean Code,A Handbook,Robert Martin,,,,,Book,Physical,Software,Prentice Hall,2008,no
Deep Work,,Cal Newport,,,,,Book,Physical,Productivity,Grand Central,2016,yes
";

    fn fixture_catalog() -> (TempDir, Catalog) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("lib.csv");
        let mut f = fs::File::create(&path).expect("create fixture");
        f.write_all(FIXTURE.as_bytes()).expect("write fixture");
        let catalog = Catalog::load(&path).expect("load fixture");
        (dir, catalog)
    }

    fn run_session(catalog: &Catalog, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        run_menu(catalog, &mut input, &mut out).expect("menu session");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn classify_recognizes_quit_and_back_words() {
        assert_eq!(classify("  QUIT \n"), Signal::Quit);
        assert_eq!(classify("!q"), Signal::Quit);
        assert_eq!(classify("exit"), Signal::Quit);
        assert_eq!(classify("Back"), Signal::Back);
        assert_eq!(classify("menu"), Signal::Back);
        assert_eq!(classify("deep work"), Signal::Line("deep work".to_string()));
    }

    #[test]
    fn quit_word_ends_the_session() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "quit\n");
        assert!(out.contains("Loaded 2 items."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn eof_ends_the_session() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "");
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn bad_id_keeps_the_session_alive() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "access\nabc\naccess\n99\nquit\n");
        assert!(out.contains("Error: invalid item id: abc"));
        assert!(out.contains("Error: no item with id 99"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn access_shows_item_detail() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "a\n2\nquit\n");
        assert!(out.contains("Accessing: Deep Work"));
        assert!(out.contains("This item is available as a free download!"));
    }

    #[test]
    fn inventory_filter_reports_empty_result() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "i\nVideo\n\nquit\n");
        assert!(out.contains("Available types: Book"));
        assert!(out.contains("Inventory is empty."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn search_found_access_returns_to_menu() {
        let (_dir, catalog) = fixture_catalog();
        // After the access the main menu banner must appear again; only
        // the explicit quit ends the session.
        let out = run_session(&catalog, "s\ndeep\nyes\n2\nquit\n");
        assert!(out.contains("Search results for 'deep':"));
        assert!(out.contains("Accessing: Deep Work"));
        let banners = out.matches("Welcome to the library catalog.").count();
        assert_eq!(banners, 2);
    }

    #[test]
    fn search_no_loops_and_back_returns_to_menu() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "search\nnothinghere\nno\ndeep\nback\nquit\n");
        assert!(out.contains("No items found matching 'nothinghere'"));
        assert!(out.contains("Search results for 'deep':"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn unknown_command_reports_and_continues() {
        let (_dir, catalog) = fixture_catalog();
        let out = run_session(&catalog, "frobnicate\nquit\n");
        assert!(out.contains("Invalid command. Please try again."));
        assert!(out.contains("Goodbye!"));
    }
}
