use crate::checks::{Check, Severity};

pub const CHECKS: &[Check] = &[
  Check {
    id: "memcpy",
    description: "Calls to memcpy that write into a stack-buffer",
    query: "{_ $buf[_]; memcpy($buf,_,_);}",
    severity: Severity::High,
    extra_args: &[],
  },
  Check {
    id: "no-return-check",
    description: "Calls to a given function that don't check the return value",
    query: "{ strict: $FUNC(_);}",
    severity: Severity::Medium,
    extra_args: &[],
  },
  Check {
    id: "wild",
    description: "Potentially uninitialized pointers passed by address",
    query: "{ _* $p; NOT: $p = _; $func(&$p); }",
    severity: Severity::High,
    extra_args: &[],
  },
  Check {
    id: "snprintf",
    description: "snprintf() return value used as an index into the buffer",
    query: "{$ret = snprintf($b,_,_);$b[$ret] = _;}",
    severity: Severity::High,
    extra_args: &[],
  },
  Check {
    id: "stack",
    description: "Stack-buffer writes bounded by a function argument",
    query: "_ $fn(_ $limit) {_ $buf[_];for (_; $i<$limit; _) {$buf[$i]=_;}}",
    severity: Severity::High,
    extra_args: &[],
  },
];
