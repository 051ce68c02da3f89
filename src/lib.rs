pub mod assumptions;
pub mod cli;
pub mod error;
pub mod graph;
pub mod index;
pub mod manager;
pub mod options;
pub mod output;
pub mod rand;
pub mod registry;
pub mod sequence;
pub mod testing;

pub use assumptions::{Assumptions, Predicate, Scope};
pub use error::{TestgenError, TestgenResult};
pub use graph::{Clique, Cycle, Graph, Path, Star, StaticGraph, Tree, identify, merge};
pub use index::{SuiteId, TestIndex, file_name, letter_suffix};
pub use manager::Manager;
pub use options::Options;
pub use output::{Gen, Printable, SPACE, Space, dump_output, print_edges, print_edges_as_tree};
pub use rand::{
    DEFAULT_SEED, Generating, GeneratorHandle, RngUtilities, UniDist, UniformInt, Xoshiro256pp,
    permutation, shuffle, uniform,
};
pub use rand_core::RngCore;
pub use registry::{
    FileSinks, ForkPolicy, ManifestEntry, MemorySinks, Registry, SinkFactory, TestRecord,
    suite_source,
};
pub use sequence::{FiniteSequence, Sequence, UniSequence};
pub use testing::{Testcase, Testing};

/// Engine type handed to every schema.
pub type GenType = Xoshiro256pp;

/// Orchestrator writing real files under `opts.output_dir` (or the working directory).
pub fn file_testing<T: Testcase>(opts: &Options) -> Testing<FileSinks, T> {
    Testing::new(opts)
}

/// Orchestrator keeping every test in memory; handy for previews and tests.
pub fn memory_testing<T: Testcase>(opts: &Options) -> Testing<MemorySinks, T> {
    Testing::with_sinks(MemorySinks, opts)
}

#[cfg(test)]
mod tests;
