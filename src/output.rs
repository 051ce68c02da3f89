//! Layout of printed values.
//!
//! Items are separated by newlines; a [`SPACE`] marker puts a single space
//! there instead. The line is closed with a newline unless the last item is
//! a space marker, and an empty list prints nothing.

use crate::graph::Graph;
use crate::rand::{Generating, Xoshiro256pp};
use std::fmt;
use std::io::{self, Write};

/// Something the layout can print. Every `Display` type is printable.
pub trait Printable {
    fn print(&self, out: &mut dyn Write, rng: &mut Xoshiro256pp) -> io::Result<()>;

    fn is_space(&self) -> bool {
        false
    }
}

impl<T: fmt::Display + ?Sized> Printable for T {
    fn print(&self, out: &mut dyn Write, _rng: &mut Xoshiro256pp) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

/// Separator marker, see [`SPACE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Space;

pub const SPACE: Space = Space;

impl Printable for Space {
    fn print(&self, out: &mut dyn Write, _rng: &mut Xoshiro256pp) -> io::Result<()> {
        out.write_all(b" ")
    }

    fn is_space(&self) -> bool {
        true
    }
}

/// Prints the value a schema generates with the engine of the current test.
#[derive(Clone, Copy, Debug)]
pub struct Gen<S>(pub S);

impl<S> Printable for Gen<S>
where
    S: Generating,
    S::Output: fmt::Display,
{
    fn print(&self, out: &mut dyn Write, rng: &mut Xoshiro256pp) -> io::Result<()> {
        let value = self.0.generate(rng);
        write!(out, "{}", value)
    }
}

pub fn dump_output(
    out: &mut dyn Write,
    rng: &mut Xoshiro256pp,
    items: &[&dyn Printable],
) -> io::Result<()> {
    let mut after_value = false;
    for item in items {
        let space = item.is_space();
        if after_value && !space {
            out.write_all(b"\n")?;
        }
        item.print(out, rng)?;
        after_value = !space;
    }
    if after_value {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// `dump!(out, rng; a, SPACE, b)` lays out the items with [`dump_output`].
#[macro_export]
macro_rules! dump {
    ($out:expr, $rng:expr; $($item:expr),* $(,)?) => {
        $crate::output::dump_output(
            $out,
            $rng,
            &[$(&$item as &dyn $crate::output::Printable),*],
        )
    };
}

/// `print_items!(testing; a, SPACE, b)` lays out the items into the current test.
#[macro_export]
macro_rules! print_items {
    ($testing:expr; $($item:expr),* $(,)?) => {
        $testing.print(&[$(&$item as &dyn $crate::output::Printable),*])
    };
}

/// One `a b` line per edge, vertex numbers shifted by `shift`.
pub fn print_edges<W: Write + ?Sized>(out: &mut W, g: &Graph, shift: i64) -> io::Result<()> {
    for (a, b) in g.edges() {
        writeln!(out, "{} {}", a as i64 + shift, b as i64 + shift)?;
    }
    Ok(())
}

/// Parent of every vertex except the root (vertex 0), one per line, in vertex
/// order. Parents come from a depth-first walk from the root.
pub fn print_edges_as_tree<W: Write + ?Sized>(out: &mut W, g: &Graph, shift: i64) -> io::Result<()> {
    let n = g.size();
    if n == 0 {
        return Ok(());
    }
    let mut parent = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut stack = vec![0usize];
    visited[0] = true;
    while let Some(w) = stack.pop() {
        for &v in g.neighbors(w) {
            if !visited[v] {
                visited[v] = true;
                parent[v] = w;
                stack.push(v);
            }
        }
    }
    for p in parent.iter().skip(1) {
        writeln!(out, "{}", *p as i64 + shift)?;
    }
    Ok(())
}
