//! # Genetic data model
//!
//! Genes, chromosomes, genotypes and individuals, from the leaves up. Every type here is an
//! immutable value: transformations produce new instances.

pub mod chromosome;
pub mod genes;
pub mod genotype;
pub mod individual;
pub mod program;

pub use chromosome::{
    BoolChromosomeFactory, BoundedChromosomeFactory, CharChromosomeFactory, Chromosome,
    ChromosomeFactory, DoubleChromosomeFactory, IntChromosomeFactory,
    PermutationChromosomeFactory, ProgramChromosomeFactory,
};
pub use genes::{
    BoolGene, Bounded, BoundedGene, CharGene, DoubleGene, Filter, Gene, IntGene, NumberGene,
    Numeric, PlaceholderGene,
};
pub use genotype::{Genotype, GenotypeFactory};
pub use individual::{Individual, Population};
pub use program::{Primitive, PrimitiveSet, Program, ProgramGene};
