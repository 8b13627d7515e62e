use crate::checks::{Check, Severity};

pub const CHECKS: &[Check] = &[
  Check {
    id: "weak",
    description: "Weak pointers dereferenced after a DCHECK instead of a real guard",
    query: "{$x = _.GetWeakPtr();  DCHECK($x);  $x->_;}",
    severity: Severity::Medium,
    extra_args: &["--cpp"],
  },
  Check {
    id: "iter",
    description: "Iterator end() validation done with DCHECK only",
    query: "DCHECK(_!=_.end());",
    severity: Severity::Low,
    extra_args: &["-X"],
  },
];
