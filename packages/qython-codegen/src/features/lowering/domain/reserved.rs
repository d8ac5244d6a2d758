//! q reserved words
//!
//! Built-in functions and keywords of q. They resolve everywhere and cannot be
//! rebound as lambda parameters.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abs", "acos", "aj", "aj0", "all", "and", "any", "asc", "asin", "asof", "atan", "attr",
        "avg", "avgs", "bin", "binr", "ceiling", "cols", "cor", "cos", "count", "cov", "cross",
        "csv", "cut", "delete", "deltas", "desc", "dev", "differ", "distinct", "div", "do",
        "dsave", "each", "ej", "ema", "enlist", "eval", "except", "exec", "exit", "exp", "fby",
        "fills", "first", "fkeys", "flip", "floor", "get", "getenv", "group", "gtime", "hclose",
        "hcount", "hdel", "hopen", "hsym", "iasc", "idesc", "if", "ij", "ijf", "in", "insert",
        "inter", "inv", "key", "keys", "last", "like", "lj", "ljf", "load", "log", "lower",
        "lsq", "ltime", "ltrim", "mavg", "max", "maxs", "mcount", "md5", "mdev", "med", "meta",
        "min", "mins", "mmax", "mmin", "mmu", "mod", "msum", "neg", "next", "not", "null", "or",
        "over", "parse", "peach", "pj", "prd", "prds", "prev", "prior", "rand", "rank", "ratios",
        "raze", "read0", "read1", "reciprocal", "reval", "reverse", "rload", "rotate", "rsave",
        "rtrim", "save", "scan", "scov", "sdev", "select", "set", "setenv", "show", "signum",
        "sin", "sqrt", "ss", "ssr", "string", "sublist", "sum", "sums", "sv", "svar", "system",
        "tables", "tan", "til", "trim", "type", "uj", "ujf", "ungroup", "union", "update",
        "upper", "upsert", "value", "var", "view", "views", "vs", "wavg", "where", "while",
        "within", "wj", "wj1", "wsum", "ww", "xasc", "xbar", "xcol", "xcols", "xdesc", "xexp",
        "xgroup", "xkey", "xlog", "xprev", "xrank",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` is a q built-in
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}
