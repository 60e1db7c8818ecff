//! # Program genes
//!
//! Tree-shaped gene values for genetic programming. A [`Program`] is a tree of
//! [`Primitive`]s stored in prefix order; each primitive only knows its name and arity.
//! Interpreting programs is left to the fitness function.

use std::sync::Arc;

use crate::constraints::{enforce, CollectionRequirement, ConstraintKind, IntRequirement};
use crate::error::Result;
use crate::genetic::genes::Gene;
use crate::rng::RandomNumberGenerator;

/// A function (arity > 0) or terminal (arity 0) of a program.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
    name: String,
    arity: usize,
}

impl Primitive {
    pub fn new<S: Into<String>>(name: S, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    pub fn terminal<S: Into<String>>(name: S) -> Self {
        Self::new(name, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_terminal(&self) -> bool {
        self.arity == 0
    }
}

/// The primitives programs are built from.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PrimitiveSetConfig")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSet {
    functions: Vec<Primitive>,
    terminals: Vec<Primitive>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PrimitiveSetConfig {
    functions: Vec<Primitive>,
    terminals: Vec<Primitive>,
}

#[cfg(feature = "serde")]
impl TryFrom<PrimitiveSetConfig> for PrimitiveSet {
    type Error = crate::error::GeneticError;

    fn try_from(config: PrimitiveSetConfig) -> Result<Self> {
        Self::new(config.functions, config.terminals)
    }
}

impl PrimitiveSet {
    /// Creates a primitive set.
    ///
    /// # Errors
    ///
    /// Fails if there are no terminals, or if a function has arity 0 or a terminal does not.
    pub fn new(functions: Vec<Primitive>, terminals: Vec<Primitive>) -> Result<Self> {
        enforce(|e| {
            e.require("terminals", terminals.as_slice(), CollectionRequirement::NotBeEmpty);
            for f in &functions {
                e.require(&format!("arity of {}", f.name()), &f.arity(), IntRequirement::BePositive);
            }
            for t in &terminals {
                e.require(&format!("arity of {}", t.name()), &t.arity(), IntRequirement::BeEqualTo(0));
            }
        })?;
        Ok(Self {
            functions,
            terminals,
        })
    }

    pub fn functions(&self) -> &[Primitive] {
        &self.functions
    }

    pub fn terminals(&self) -> &[Primitive] {
        &self.terminals
    }

    /// All primitives with the given arity.
    pub fn with_arity(&self, arity: usize) -> Vec<&Primitive> {
        self.functions
            .iter()
            .chain(self.terminals.iter())
            .filter(|p| p.arity() == arity)
            .collect()
    }
}

/// A program tree in prefix order.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ProgramConfig")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    nodes: Vec<Primitive>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ProgramConfig {
    nodes: Vec<Primitive>,
}

#[cfg(feature = "serde")]
impl TryFrom<ProgramConfig> for Program {
    type Error = crate::error::GeneticError;

    fn try_from(config: ProgramConfig) -> Result<Self> {
        Self::new(config.nodes)
    }
}

impl Program {
    /// Creates a program from prefix-ordered nodes.
    ///
    /// # Errors
    ///
    /// Fails if the nodes do not form exactly one complete tree.
    pub fn new(nodes: Vec<Primitive>) -> Result<Self> {
        let program = Self { nodes };
        enforce(|e| {
            e.check("program", ConstraintKind::Collection, program.is_well_formed(), || {
                format!("{} does not form a single complete tree", program)
            });
        })?;
        Ok(program)
    }

    /// Grows a random program no deeper than `max_depth` (a lone terminal has depth 0).
    pub fn grow(set: &PrimitiveSet, max_depth: usize, rng: &mut RandomNumberGenerator) -> Self {
        let mut nodes = Vec::new();
        grow_into(set, max_depth, rng, &mut nodes);
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Primitive] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if every node receives exactly as many children as its arity.
    pub fn is_well_formed(&self) -> bool {
        let mut open: usize = 1;
        for node in &self.nodes {
            if open == 0 {
                return false;
            }
            open = open - 1 + node.arity();
        }
        open == 0
    }

    /// Returns a copy with the node at `index` replaced.
    pub fn with_node(&self, index: usize, primitive: Primitive) -> Self {
        let mut nodes = self.nodes.clone();
        nodes[index] = primitive;
        Self { nodes }
    }
}

fn grow_into(
    set: &PrimitiveSet,
    depth_left: usize,
    rng: &mut RandomNumberGenerator,
    nodes: &mut Vec<Primitive>,
) {
    let pick_terminal = depth_left == 0 || set.functions().is_empty() || rng.coin(0.5);
    let pool = if pick_terminal {
        set.terminals()
    } else {
        set.functions()
    };
    let node = pool[rng.index(pool.len())].clone();
    let arity = node.arity();
    nodes.push(node);
    for _ in 0..arity {
        grow_into(set, depth_left.saturating_sub(1), rng, nodes);
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.nodes.iter().map(|n| n.name()).collect();
        write!(f, "[{}]", names.join(" "))
    }
}

/// A gene holding a program over a shared primitive set.
#[derive(Debug, Clone)]
pub struct ProgramGene {
    program: Program,
    set: Arc<PrimitiveSet>,
    max_depth: usize,
}

impl ProgramGene {
    pub fn new(program: Program, set: Arc<PrimitiveSet>, max_depth: usize) -> Self {
        Self {
            program,
            set,
            max_depth,
        }
    }

    pub fn random(set: Arc<PrimitiveSet>, max_depth: usize, rng: &mut RandomNumberGenerator) -> Self {
        let program = Program::grow(&set, max_depth, rng);
        Self::new(program, set, max_depth)
    }

    pub fn primitive_set(&self) -> &PrimitiveSet {
        &self.set
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Gene for ProgramGene {
    type Value = Program;

    fn value(&self) -> &Program {
        &self.program
    }

    fn generate(&self, rng: &mut RandomNumberGenerator) -> Self {
        Self::random(Arc::clone(&self.set), self.max_depth, rng)
    }

    fn duplicate_with_value(&self, value: Program) -> Self {
        Self::new(value, Arc::clone(&self.set), self.max_depth)
    }

    fn verify(&self) -> bool {
        self.program.is_well_formed()
    }
}
