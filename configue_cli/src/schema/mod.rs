//! Declarative descriptions of structured configuration types.
//!
//! A [`Structured`] type exposes a [`TypeDescriptor`]: its fully-qualified
//! name and an ordered list of [`FieldSpec`]s. Each field carries exactly one
//! [`DefaultSpec`]. The derive macro writes these descriptors; they can also
//! be built by hand:
//!
//! ```
//! use configue_cli::schema::{FieldSpec, Structured, TypeDescriptor};
//! use configue_cli::{FactoryError, Record, Shadow, ToInstance, Instance};
//!
//! struct Retry {
//!     attempts: u32,
//!     budget: u32,
//! }
//!
//! fn budget(shadow: &Shadow) -> Result<u32, FactoryError> {
//!     Ok(shadow.get::<u32>("attempts")? * 10)
//! }
//!
//! impl ToInstance for Retry {
//!     fn to_instance(&self) -> Instance {
//!         Record::of::<Self>()
//!             .with("attempts", self.attempts)
//!             .with("budget", self.budget)
//!             .into()
//!     }
//! }
//!
//! impl Structured for Retry {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>()
//!             .field(FieldSpec::new("attempts").default_value(3))
//!             .field(FieldSpec::new("budget").factory_takes_self(budget))
//!     }
//! }
//! ```

mod instance;
mod shadow;

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{ConfigValue, ConfigueError, ConfigueResult, FactoryError};

pub use instance::{Instance, Record, ToInstance};
pub use shadow::Shadow;

/// Implemented by types usable as configuration schemas.
pub trait Structured: ToInstance {
    /// Describe the type's fields in declaration order.
    fn descriptor() -> TypeDescriptor;
}

/// Zero-argument default factory.
pub type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Factory reading earlier sibling fields through the shadow record.
pub type SelfFactory = Arc<dyn Fn(&Shadow) -> Result<Instance, FactoryError> + Send + Sync>;

/// Conversion applied before a value is stored on the shadow record.
pub type Converter = Arc<dyn Fn(&Instance) -> Result<Instance, FactoryError> + Send + Sync>;

/// Handle to a type that may or may not describe its fields.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    descriptor: Option<fn() -> TypeDescriptor>,
}

impl TypeRef {
    /// Handle to a structured type.
    #[must_use]
    pub fn of<T: Structured>() -> Self {
        Self {
            name: type_name::<T>(),
            descriptor: Some(T::descriptor),
        }
    }

    /// Handle to a type the traverser treats as an opaque leaf.
    #[must_use]
    pub fn opaque<T: ?Sized>() -> Self {
        Self {
            name: type_name::<T>(),
            descriptor: None,
        }
    }

    /// Fully-qualified type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the handle describes its fields.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Fetch the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigueError::UnsupportedType`] for opaque handles.
    pub fn descriptor(&self) -> ConfigueResult<TypeDescriptor> {
        self.descriptor
            .map(|describe| describe())
            .ok_or_else(|| ConfigueError::unsupported(self.name))
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name)
            .field("structured", &self.is_structured())
            .finish()
    }
}

/// Default taxonomy of a field.
#[derive(Clone, Default)]
#[non_exhaustive]
pub enum DefaultSpec {
    /// No default; the value comes from an override or stays missing.
    #[default]
    None,
    /// Static default value.
    Value(ConfigValue),
    /// Static default that is itself a type, traversed recursively.
    Type(TypeRef),
    /// Factory independent of sibling fields.
    Factory(Factory),
    /// Factory reading earlier sibling fields.
    SelfFactory(SelfFactory),
}

impl fmt::Debug for DefaultSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::SelfFactory(_) => f.write_str("SelfFactory(..)"),
        }
    }
}

/// Description of one field.
#[derive(Clone)]
pub struct FieldSpec {
    name: Cow<'static, str>,
    init: bool,
    default: DefaultSpec,
    nested: Option<TypeRef>,
    converter: Option<Converter>,
}

impl FieldSpec {
    /// Init-participating field without a default.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            init: true,
            default: DefaultSpec::None,
            nested: None,
            converter: None,
        }
    }

    /// Static default value.
    #[must_use]
    pub fn default_value<T: ToInstance>(mut self, value: T) -> Self {
        self.default = DefaultSpec::Value(value.to_instance().to_config_value());
        self
    }

    /// Default given as a type, traversed when structured.
    #[must_use]
    pub fn default_type(mut self, ty: TypeRef) -> Self {
        self.default = DefaultSpec::Type(ty);
        self
    }

    /// Zero-argument factory.
    #[must_use]
    pub fn factory<F, T>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: ToInstance,
    {
        self.default = DefaultSpec::Factory(Arc::new(move || factory().to_instance()));
        self
    }

    /// Factory reading earlier siblings through the shadow record.
    #[must_use]
    pub fn factory_takes_self<F, T>(mut self, factory: F) -> Self
    where
        F: Fn(&Shadow) -> Result<T, FactoryError> + Send + Sync + 'static,
        T: ToInstance,
    {
        self.default = DefaultSpec::SelfFactory(Arc::new(move |shadow| {
            factory(shadow).map(|value| value.to_instance())
        }));
        self
    }

    /// Structured type to traverse when the field has no default.
    #[must_use]
    pub const fn nested(mut self, ty: TypeRef) -> Self {
        self.nested = Some(ty);
        self
    }

    /// Conversion applied before the value reaches the shadow record.
    #[must_use]
    pub fn converter<F, T>(mut self, converter: F) -> Self
    where
        F: Fn(&Instance) -> Result<T, FactoryError> + Send + Sync + 'static,
        T: ToInstance,
    {
        self.converter = Some(Arc::new(move |value| {
            converter(value).map(|converted| converted.to_instance())
        }));
        self
    }

    /// Exclude the field from construction and from skeletons.
    #[must_use]
    pub const fn no_init(mut self) -> Self {
        self.init = false;
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the field is set at construction time.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        self.init
    }

    /// How the field's default is produced.
    #[must_use]
    pub const fn default_spec(&self) -> &DefaultSpec {
        &self.default
    }

    /// Structured type declared for a field without a default.
    #[must_use]
    pub const fn nested_type(&self) -> Option<&TypeRef> {
        self.nested.as_ref()
    }

    pub(crate) const fn converter_fn(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("init", &self.init)
            .field("default", &self.default)
            .field("nested", &self.nested)
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

/// Name and ordered fields of a structured type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    type_name: Cow<'static, str>,
    fields: Vec<FieldSpec>,
}

impl TypeDescriptor {
    /// Descriptor named after `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Descriptor with an explicit type name.
    #[must_use]
    pub fn named(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Fully-qualified type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Init-participating fields in declaration order.
    pub fn init_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.is_init())
    }
}
