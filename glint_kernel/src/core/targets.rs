use crate::tracing_targets;

tracing_targets! {
    KERNEL = "kernel",
    SURFACE = "surface",
    SCRATCH = "scratch",
    EPSILON = "epsilon",
}
