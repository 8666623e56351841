//! Tree formatter for selection trees
//!
//! This module provides `TreeFormatter` which formats the visible part of a
//! `SelectionTree` into a string or prints it with colors. Unchecked nodes are
//! left out together with everything below them.

use std::convert::Infallible;
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::selection::{NodeId, SelectionTree};

use super::config::OutputConfig;
use super::utils::{connector, display_name, indent, visible_children};

/// A visible node waiting to be drawn.
struct Pending {
    id: NodeId,
    depth: usize,
    is_last: bool,
}

/// Visit visible nodes below the root in drawing order.
///
/// `visit` receives the indentation prefix, whether the node is the last
/// visible sibling, and the node itself. A single prefix buffer is shared
/// across the walk; `ends[d]` is its byte length at depth `d`. The walk stops
/// at the first error `visit` returns.
fn walk<E, F>(tree: &SelectionTree, mut visit: F) -> Result<(), E>
where
    F: FnMut(&str, bool, NodeId) -> Result<(), E>,
{
    let mut prefix = String::new();
    let mut ends = vec![0];
    let mut stack = Vec::new();
    push_children(tree, tree.root(), 0, &mut stack);

    while let Some(Pending { id, depth, is_last }) = stack.pop() {
        prefix.truncate(ends[depth]);
        ends.truncate(depth + 1);
        visit(&prefix, is_last, id)?;

        prefix.push_str(indent(is_last));
        ends.push(prefix.len());
        push_children(tree, id, depth + 1, &mut stack);
    }
    Ok(())
}

/// Push the visible children of `id` so that the first one is popped first.
fn push_children(tree: &SelectionTree, id: NodeId, depth: usize, stack: &mut Vec<Pending>) {
    let visible = visible_children(tree, id);
    let last = visible.len().saturating_sub(1);
    for (i, child) in visible.into_iter().enumerate().rev() {
        stack.push(Pending {
            id: child,
            depth,
            is_last: i == last,
        });
    }
}

/// Render the selected part of `tree` as a plain-text diagram.
///
/// ```
/// use treemark::{CheckState, SelectionTree, render};
///
/// let mut tree = SelectionTree::new("proj");
/// let src = tree.add_child(tree.root(), "src", true);
/// tree.add_child(src, "a.go", false);
/// let readme = tree.add_child(tree.root(), "README.md", false);
/// tree.set_state(readme, CheckState::Unchecked, true, true).unwrap();
///
/// assert_eq!(render(&tree), "proj/\n└── src/\n    └── a.go\n");
/// ```
pub fn render(tree: &SelectionTree) -> String {
    let mut output = format!("{}\n", display_name(tree, tree.root()));
    let Ok(()) = walk::<Infallible, _>(tree, |prefix, is_last, id| {
        output.push_str(prefix);
        output.push_str(connector(is_last));
        output.push_str(&display_name(tree, id));
        output.push('\n');
        Ok(())
    });
    output
}

/// Formatter for selection tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, tree: &SelectionTree) -> String {
        let mut output = render(tree);
        if self.config.summary {
            let (dir_count, file_count) = count_visible(tree);
            output.push_str(&format!(
                "\n{} directories, {} files\n",
                dir_count, file_count
            ));
        }
        output
    }

    pub fn print(&self, tree: &SelectionTree) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(tree, &mut stdout)
    }

    /// Render into an in-memory buffer, with ANSI colors when enabled.
    pub fn to_buffer(&self, tree: &SelectionTree) -> io::Result<Buffer> {
        let mut buffer = if self.config.use_color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        self.write_to(tree, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the diagram to any color-aware writer.
    pub fn write_to<W: WriteColor>(&self, tree: &SelectionTree, out: &mut W) -> io::Result<()> {
        let mut dir_spec = ColorSpec::new();
        dir_spec.set_fg(Some(Color::Blue)).set_bold(true);
        let mut file_spec = ColorSpec::new();
        file_spec.set_fg(Some(Color::White));

        out.set_color(&dir_spec)?;
        write!(out, "{}", display_name(tree, tree.root()))?;
        out.reset()?;
        writeln!(out)?;

        walk(tree, |prefix, is_last, id| {
            write!(out, "{}{}", prefix, connector(is_last))?;
            if tree.is_container(id) {
                out.set_color(&dir_spec)?;
            } else {
                out.set_color(&file_spec)?;
            }
            write!(out, "{}", display_name(tree, id))?;
            out.reset()?;
            writeln!(out)
        })?;

        if self.config.summary {
            let (dir_count, file_count) = count_visible(tree);
            writeln!(out)?;
            writeln!(out, "{} directories, {} files", dir_count, file_count)?;
        }
        Ok(())
    }
}

/// Visible directories and files below the root.
fn count_visible(tree: &SelectionTree) -> (usize, usize) {
    let (mut dirs, mut files) = (0, 0);
    let Ok(()) = walk::<Infallible, _>(tree, |_, _, id| {
        if tree.is_container(id) {
            dirs += 1;
        } else {
            files += 1;
        }
        Ok(())
    });
    (dirs, files)
}
