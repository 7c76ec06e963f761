//! Business logic services for the application layer.

pub mod code_allocator;
pub mod code_generator;
pub mod redirect_resolver;

pub use code_allocator::{AllocationError, CodeAllocator, DEFAULT_MAX_ATTEMPTS};
pub use code_generator::{CodeGenerator, GENERATED_CODE_LENGTH, RandomCodeGenerator};
pub use redirect_resolver::{RedirectResolver, Resolution, ResolveError};
