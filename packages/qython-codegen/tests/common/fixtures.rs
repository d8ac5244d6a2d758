//! Qython source fixtures

/// Newton square root with an explicit loop and early returns
pub const NMSQ_WHILE: &str = r#"def nmsq_while(x, precision=1e-10):
    """
    Compute square root using Newton's method with while loop.

    Args:
        x: Number to find square root of
        precision: Convergence tolerance
    """
    if x < 0:
        raise ValueError("Cannot compute square root of negative number")
    if x == 0:
        return 0

    # Initial guess
    guess = x / 2

    while True:
        # Newton's method: new_guess = (guess + x/guess) / 2
        new_guess = (guess + x / guess) / 2

        # Check for convergence
        if abs(new_guess - guess) < precision:
            return new_guess

        guess = new_guess
"#;

/// Expected q for `NMSQ_WHILE`
pub const NMSQ_WHILE_Q: &str = r#"nmsq_while:{[x;precision]
    if[x<0; `$"Cannot compute square root of negative number"];
    if[x=0; :0];

    guess:x%2;

    while[1b;
        new_guess:(guess+x%guess)%2;

        if[abs[new_guess-guess]<precision; :new_guess];

        guess:new_guess
        ]
    }"#;

/// Newton square root with a `for` loop (not part of the dialect)
pub const NMSQ_FOR: &str = r#"def nmsq(x, precision=1e-10, max_iterations=100):
    """Compute square root using Newton's method."""
    if x < 0:
        raise ValueError("Cannot compute square root of negative number")
    if x == 0:
        return 0

    guess = x / 2

    for i in range(max_iterations):
        new_guess = (guess + x / guess) / 2
        if abs(new_guess - guess) < precision:
            return new_guess
        guess = new_guess

    return guess
"#;

/// The two Qython-only statements plus the fixpoint builtin
pub const DIALECT_PROGRAM: &str = r#"def halve(x, n):
    do n times:
        x = x / 2
    return x

def newton(x):
    guess = x / 2
    converge guess:
        guess = (guess + x / guess) / 2
    return guess

def fixed(step, x):
    return converge(step, starting_from=x)
"#;

pub const HALVE_Q: &str = "halve:{[x;n]\n    do[n; x:x%2];\n    :x\n    }";

pub const NEWTON_Q: &str = r#"newton:{[x]
    guess:x%2;
    guess:{[guess;x]
        guess:(guess+x%guess)%2;
        guess
        }[;x]/[guess];
    :guess
    }"#;

pub const FIXED_Q: &str = "fixed:{[step;x] :step/[x]}";

/// Generate a module with N independent one-line functions
pub fn fixture_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| format!("def func_{i}(x):\n    return x * {i} + 1\n\n"))
        .collect()
}
