//! Line-oriented command loop over a tree of integer keys.
//!
//! The console only goes through the public tree operations: insert, delete,
//! find, traversal strategy get/set, traverse and clear.
use crate::rbtree::{ParseStrategyError, RedBlackTree, TraversalStrategy};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

pub const MENU: &str = "\
1.- Add items       (add <keys..>)
2.- Delete items    (delete <keys..>)
3.- Check items     (check <keys..>)
4.- Print tree      (print)
5.- Delete tree     (clear)
    Traversal order (order <pre|in|post>, walk)
    Leave           (quit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<i64>),
    Delete(Vec<i64>),
    Check(Vec<i64>),
    /// Print the tree with every traversal order
    Print,
    /// Print the tree with the active traversal order only
    Walk,
    Order(TraversalStrategy),
    Clear,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, type `help` for the list of commands")]
    Unknown(String),

    #[error("invalid key {token:?}: {source}")]
    InvalidKey {
        token: String,
        source: ParseIntError,
    },

    #[error("`{0}` needs at least one key")]
    MissingKeys(&'static str),

    #[error("`order` needs one of: pre, in, post")]
    MissingOrder,

    #[error(transparent)]
    Order(#[from] ParseStrategyError),
}

fn parse_keys<'a, I>(name: &'static str, tokens: I) -> Result<Vec<i64>, CommandError>
where
    I: Iterator<Item = &'a str>,
{
    let keys = tokens
        .map(|token| {
            token.parse().map_err(|source| CommandError::InvalidKey {
                token: token.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<i64>, _>>()?;
    if keys.is_empty() {
        return Err(CommandError::MissingKeys(name));
    }
    Ok(keys)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        match name.to_ascii_lowercase().as_str() {
            "1" | "add" | "insert" => Ok(Command::Add(parse_keys("add", tokens)?)),
            "2" | "delete" | "del" => Ok(Command::Delete(parse_keys("delete", tokens)?)),
            "3" | "check" | "find" => Ok(Command::Check(parse_keys("check", tokens)?)),
            "4" | "print" => Ok(Command::Print),
            "5" | "clear" => Ok(Command::Clear),
            "walk" => Ok(Command::Walk),
            "order" => {
                let order = tokens.next().ok_or(CommandError::MissingOrder)?;
                Ok(Command::Order(order.parse()?))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Whether the loop should keep reading commands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<W: Write> {
    tree: RedBlackTree<i64>,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Console {
            tree: RedBlackTree::new(),
            out,
        }
    }

    pub fn tree(&self) -> &RedBlackTree<i64> {
        &self.tree
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands line by line until the input ends or a `quit` command
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        writeln!(self.out, "{}", MENU)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    warn!("rejected command {:?}: {}", line, err);
                    writeln!(self.out, "error: {}", err)?;
                }
            }
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        info!("executing {:?}", command);
        match command {
            Command::Add(keys) => {
                for key in keys {
                    self.tree.insert(key);
                }
                self.print_all()?;
            }
            Command::Delete(keys) => {
                for key in keys {
                    write!(self.out, "Deleting item {}", key)?;
                    if self.tree.delete(&key) {
                        writeln!(self.out, ": deleted!")?;
                    } else {
                        writeln!(self.out, ": does not exist!")?;
                    }
                }
                self.print_all()?;
            }
            Command::Check(keys) => {
                for key in keys {
                    let found = if self.tree.find(&key) {
                        "found"
                    } else {
                        "not found"
                    };
                    writeln!(self.out, "{}: {}", key, found)?;
                }
            }
            Command::Print => self.print_all()?,
            Command::Walk => {
                let strategy = self.tree.traversal_strategy();
                self.print_with(strategy)?;
            }
            Command::Order(strategy) => {
                self.tree.set_traversal_strategy(strategy);
                writeln!(self.out, "Traversal order set to {}", strategy)?;
            }
            Command::Clear => {
                self.tree.clear();
                writeln!(self.out, "Tree deleted!")?;
            }
            Command::Help => writeln!(self.out, "{}", MENU)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Print the tree in, pre and post order
    fn print_all(&mut self) -> io::Result<()> {
        for &strategy in &[
            TraversalStrategy::InOrder,
            TraversalStrategy::PreOrder,
            TraversalStrategy::PostOrder,
        ] {
            self.print_with(strategy)?;
        }
        Ok(())
    }

    /// Print the tree with `strategy`, then restore the active strategy
    fn print_with(&mut self, strategy: TraversalStrategy) -> io::Result<()> {
        let active = self.tree.traversal_strategy();
        self.tree.set_traversal_strategy(strategy);
        writeln!(self.out, "{} Strategy.", strategy)?;
        for record in self.tree.traverse() {
            writeln!(self.out, "{}", record)?;
        }
        self.tree.set_traversal_strategy(active);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(input: &str) -> String {
        let mut console = Console::new(Vec::new());
        console.run(input.as_bytes()).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn parse() {
        assert_eq!("add 1 2 3".parse::<Command>(), Ok(Command::Add(vec![1, 2, 3])));
        assert_eq!("1 -4".parse::<Command>(), Ok(Command::Add(vec![-4])));
        assert_eq!("DEL 7".parse::<Command>(), Ok(Command::Delete(vec![7])));
        assert_eq!("3 9".parse::<Command>(), Ok(Command::Check(vec![9])));
        assert_eq!("4".parse::<Command>(), Ok(Command::Print));
        assert_eq!("clear".parse::<Command>(), Ok(Command::Clear));
        assert_eq!(
            "order post".parse::<Command>(),
            Ok(Command::Order(TraversalStrategy::PostOrder))
        );
        assert_eq!("  quit  ".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "grow 3".parse::<Command>(),
            Err(CommandError::Unknown("grow".to_string()))
        );
        assert_eq!(
            "add".parse::<Command>(),
            Err(CommandError::MissingKeys("add"))
        );
        assert_eq!("order".parse::<Command>(), Err(CommandError::MissingOrder));
        assert_eq!(
            "order level".parse::<Command>(),
            Err(CommandError::Order(ParseStrategyError("level".to_string())))
        );
        match "add 1 x".parse::<Command>() {
            Err(CommandError::InvalidKey { token, .. }) => assert_eq!(token, "x"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn add_prints_three_orders() {
        let out = run("add 10 20 30\n");
        let expected = "\
In Order Strategy.
Color: Red Key: 10 Parent: 20
Color: Black Key: 20 Parent: nil
Color: Red Key: 30 Parent: 20
Pre Order Strategy.
Color: Black Key: 20 Parent: nil
Color: Red Key: 10 Parent: 20
Color: Red Key: 30 Parent: 20
Post Order Strategy.
Color: Red Key: 10 Parent: 20
Color: Red Key: 30 Parent: 20
Color: Black Key: 20 Parent: nil
";
        assert!(out.ends_with(expected), "{}", out);
    }

    #[test]
    fn delete_check_and_clear() {
        let out = run("add 5 3 8\ndelete 3 4\ncheck 3 5\nclear\ncheck 5\n");
        assert!(out.contains("Deleting item 3: deleted!\n"));
        assert!(out.contains("Deleting item 4: does not exist!\n"));
        assert!(out.contains("3: not found\n5: found\n"));
        assert!(out.contains("Tree deleted!\n5: not found\n"));
    }

    #[test]
    fn order_and_walk() {
        let mut console = Console::new(Vec::new());
        console
            .run("add 10 20 30\norder pre\nwalk\nprint\n".as_bytes())
            .unwrap();
        assert_eq!(
            console.tree().traversal_strategy(),
            TraversalStrategy::PreOrder
        );
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains(
            "Traversal order set to Pre Order\n\
             Pre Order Strategy.\n\
             Color: Black Key: 20 Parent: nil\n\
             Color: Red Key: 10 Parent: 20\n\
             Color: Red Key: 30 Parent: 20\n\
             In Order Strategy.\n"
        ));
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let out = run("add 1 two\nfrobnicate\nadd 2\nquit\nadd 3\n");
        assert!(out.contains("error: invalid key \"two\""));
        assert!(out.contains("error: unknown command \"frobnicate\""));
        assert!(out.contains("Color: Black Key: 2 Parent: nil"));
        assert!(!out.contains("Key: 3"));
    }
}
