//! Variance tree builder.
//!
//! The engine walks two values depth-first with an explicit work stack, so
//! deep graphs never grow the call stack and variances are produced lazily,
//! one at a time, in the order a recursive walk would find them.

use crate::config::ComparerConfig;
use crate::core_types::ComparisonId;
use crate::descriptor::{self, TypeDescriptor};
use crate::diff::cycle_guard::{CycleGuard, Identity};
use crate::diff::model::{Operand, Variance, TYPE_LABEL, VALUE_LABEL};
use crate::diff::reconcile::{reconcile, ElementPair};
use crate::errors::{DiffError, Result};
use crate::inspect::{Inspect, Record, View};
use crate::terminal::resolve;
use crate::{log_op_end, log_op_error, log_op_start};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;
use std::time::Instant;

/// Compare two values with the default configuration.
///
/// # Errors
///
/// Fails on the first `DiffError` met during traversal; see [`Variances`].
pub fn compare<'a>(left: &'a dyn Inspect, right: &'a dyn Inspect) -> Result<Vec<Variance<'a>>> {
    Comparer::default().compare(left, right)
}

/// Lazily compare two values with the default configuration.
pub fn variances<'a>(left: &'a dyn Inspect, right: &'a dyn Inspect) -> Variances<'a> {
    Comparer::default().iter(left, right)
}

/// A configured entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparer {
    config: ComparerConfig,
}

impl Comparer {
    pub fn new(config: ComparerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparerConfig {
        &self.config
    }

    /// Collect every variance between `left` and `right`
    ///
    /// # Errors
    ///
    /// - `InvalidShape` if a value exposes an inconsistent shape
    /// - `DuplicateKey` if a keyed sequence repeats a key on one side
    /// - `MultipleKeyDeclarations` if a compared type declares its key twice
    pub fn compare<'a>(
        &self,
        left: &'a dyn Inspect,
        right: &'a dyn Inspect,
    ) -> Result<Vec<Variance<'a>>> {
        self.iter(left, right).collect()
    }

    /// Start a lazy comparison
    pub fn iter<'a>(&self, left: &'a dyn Inspect, right: &'a dyn Inspect) -> Variances<'a> {
        Variances::new(self.config, left, right)
    }
}

enum Task<'a> {
    /// Compare two values reached under `label`
    Pair {
        left: &'a dyn Inspect,
        right: &'a dyn Inspect,
        label: Option<Cow<'static, str>>,
        parent: Option<Variance<'a>>,
    },
    /// Remaining members of a record pair, starting at ordinal `next`
    Members {
        node: Variance<'a>,
        left: &'a dyn Record,
        right: &'a dyn Record,
        descriptor: Arc<TypeDescriptor>,
        next: usize,
    },
    /// Remaining aligned elements of a sequence pair
    Elements {
        node: Variance<'a>,
        pairs: std::vec::IntoIter<ElementPair<'a>>,
    },
}

/// Lazy, single-pass sequence of variances for one comparison.
///
/// Yields `Ok` variances in traversal order. The first error is yielded
/// once and ends the sequence.
pub struct Variances<'a> {
    config: ComparerConfig,
    guard: CycleGuard,
    stack: Vec<Task<'a>>,
    pending: VecDeque<Variance<'a>>,
    comparison_id: ComparisonId,
    span: tracing::Span,
    started: Instant,
    emitted: usize,
    done: bool,
}

impl<'a> Variances<'a> {
    fn new(config: ComparerConfig, left: &'a dyn Inspect, right: &'a dyn Inspect) -> Self {
        let comparison_id = ComparisonId::new();
        let span = tracing::info_span!("compare", comparison_id = %comparison_id);
        span.in_scope(|| {
            log_op_start!(
                "compare",
                left_type = left.type_name(),
                right_type = right.type_name()
            );
        });

        Self {
            config,
            guard: CycleGuard::new(),
            stack: vec![Task::Pair {
                left,
                right,
                label: None,
                parent: None,
            }],
            pending: VecDeque::new(),
            comparison_id,
            span,
            started: Instant::now(),
            emitted: 0,
            done: false,
        }
    }

    /// Correlation id of this comparison, as logged
    pub fn comparison_id(&self) -> &ComparisonId {
        &self.comparison_id
    }

    fn step(&mut self, task: Task<'a>) -> Result<()> {
        match task {
            Task::Pair {
                left,
                right,
                label,
                parent,
            } => self.visit_pair(left, right, label, parent),
            Task::Members {
                node,
                left,
                right,
                descriptor,
                next,
            } => {
                let Some(member) = descriptor
                    .members
                    .iter()
                    .skip(next)
                    .find(|m| !m.is_ignored())
                else {
                    return Ok(());
                };
                let (name, ordinal) = (member.name, member.ordinal);
                let missing = |record: &dyn Record| {
                    DiffError::invalid_member(
                        record.shape().name,
                        name,
                        format!("member {} is declared but not exposed", name),
                    )
                };
                let l = left.member(name).ok_or_else(|| missing(left))?;
                let r = right.member(name).ok_or_else(|| missing(right))?;

                self.stack.push(Task::Members {
                    node: node.clone(),
                    left,
                    right,
                    descriptor,
                    next: ordinal + 1,
                });
                self.stack.push(Task::Pair {
                    left: l,
                    right: r,
                    label: Some(Cow::Borrowed(name)),
                    parent: Some(node),
                });
                Ok(())
            }
            Task::Elements { node, mut pairs } => {
                if let Some((label, l, r)) = pairs.next() {
                    self.stack.push(Task::Elements {
                        node: node.clone(),
                        pairs,
                    });
                    self.stack.push(Task::Pair {
                        left: l,
                        right: r,
                        label: Some(label),
                        parent: Some(node),
                    });
                }
                Ok(())
            }
        }
    }

    fn visit_pair(
        &mut self,
        left: &'a dyn Inspect,
        right: &'a dyn Inspect,
        label: Option<Cow<'static, str>>,
        parent: Option<Variance<'a>>,
    ) -> Result<()> {
        let (l, r) = match (resolve(left)?, resolve(right)?) {
            (None, None) => return Ok(()),
            (Some(l), Some(r)) => (l, r),
            (l, r) => {
                self.emit(Variance::new(
                    Some(label.unwrap_or(Cow::Borrowed(VALUE_LABEL))),
                    Operand::from_resolved(l),
                    Operand::from_resolved(r),
                    parent,
                ));
                return Ok(());
            }
        };

        if Identity::of(l) == Identity::of(r) {
            return Ok(());
        }
        if self.guard.already_traversed(l, r) {
            tracing::trace!(
                type_name = l.type_name(),
                label = label.as_deref().unwrap_or(""),
                "pair already traversed"
            );
            return Ok(());
        }
        if type_ignored(l)? || type_ignored(r)? {
            return Ok(());
        }
        if l.runtime_type() != r.runtime_type() {
            self.emit(Variance::new(
                Some(label.unwrap_or(Cow::Borrowed(TYPE_LABEL))),
                Operand::Value(l),
                Operand::Value(r),
                parent,
            ));
            return Ok(());
        }

        match (l.view(), r.view()) {
            (View::Scalar(a), View::Scalar(b)) => {
                if a != b {
                    self.emit(Variance::new(
                        label,
                        Operand::Value(l),
                        Operand::Value(r),
                        parent,
                    ));
                }
                Ok(())
            }
            (View::Record(a), View::Record(b)) => {
                if !std::ptr::eq(a.shape(), b.shape()) {
                    return Err(DiffError::invalid_shape(
                        a.shape().name,
                        format!("member list diverges from {}", b.shape().name),
                    ));
                }
                let descriptor = descriptor::resolve(Some(a.shape()))?;
                let node = Variance::new(label, Operand::Value(l), Operand::Value(r), parent);
                self.guard.mark_traversed(l, r);
                self.stack.push(Task::Members {
                    node,
                    left: a,
                    right: b,
                    descriptor,
                    next: 0,
                });
                Ok(())
            }
            (View::Sequence(a), View::Sequence(b)) => {
                let node = Variance::new(label, Operand::Value(l), Operand::Value(r), parent);
                self.guard.mark_traversed(l, r);
                let reconciled = reconcile(a, b, self.config.sequence_mode, &node)?;
                for extra in reconciled.extras {
                    self.emit(extra);
                }
                self.stack.push(Task::Elements {
                    node,
                    pairs: reconciled.pairs.into_iter(),
                });
                Ok(())
            }
            _ => Err(DiffError::invalid_shape(
                l.type_name(),
                "values of one type classify differently",
            )),
        }
    }

    fn emit(&mut self, variance: Variance<'a>) {
        self.pending.push_back(variance);
    }

    fn finish(&mut self) {
        self.done = true;
        log_op_end!(
            "compare",
            duration_ms = self.started.elapsed().as_millis() as u64,
            variance_count = self.emitted,
            traversed_pairs = self.guard.len()
        );
        self.guard.clear();
    }

    fn fail(&mut self, err: DiffError) {
        self.done = true;
        self.stack.clear();
        self.pending.clear();
        self.guard.clear();
        log_op_error!(
            "compare",
            err,
            duration_ms = self.started.elapsed().as_millis() as u64
        );
    }
}

fn type_ignored(value: &dyn Inspect) -> Result<bool> {
    match value.view() {
        View::Record(record) => Ok(descriptor::resolve(Some(record.shape()))?.ignored),
        _ => Ok(false),
    }
}

impl<'a> Iterator for Variances<'a> {
    type Item = Result<Variance<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let span = self.span.clone();
        let _entered = span.enter();

        loop {
            if let Some(variance) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(Ok(variance));
            }
            let Some(task) = self.stack.pop() else {
                self.finish();
                return None;
            };
            if let Err(err) = self.step(task) {
                self.fail(err.clone());
                return Some(Err(err));
            }
        }
    }
}

impl FusedIterator for Variances<'_> {}
