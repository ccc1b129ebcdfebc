//! Extension registries
//!
//! Runtime extensions register themselves into these `linkme` distributed
//! slices at compile time. Kinds are keyed by a stable string tag.

pub mod binding;
pub mod catalog;
pub mod channel_binding;
pub mod interceptor;
pub mod transformer;

pub use binding::{
    BINDING_ATTACHERS, BindingAttacher, BindingAttacherEntry, find_binding_attacher,
    list_binding_attachers,
};
pub use catalog::{BindingCatalog, RegisteredBindings};
pub use channel_binding::{
    CHANNEL_BINDING_BUILDERS, ChannelBindingBuilder, ChannelBindingBuilderEntry,
    list_channel_binding_builders, resolve_channel_binding_builder,
};
pub use interceptor::{
    INTERCEPTOR_BUILDERS, InterceptorBuilder, InterceptorBuilderEntry, list_interceptor_builders,
    resolve_interceptor_builder,
};
pub use transformer::{
    TRANSFORMER_FACTORIES, TransformerFactoryEntry, list_transformer_factories,
    resolve_transformer_factories,
};
