//! Class, interface and trait relationships for named type tokens.
//!
//! The matcher never inspects an object model directly. It asks a
//! [`ClassInfoProvider`] for the direct relationships of a name and
//! [`ClassHierarchy`] folds those into a per-class [`Lineage`], computed once
//! and cached for the lifetime of the hierarchy.
//!
//! Names the provider does not know simply have no relationships, so a
//! token naming a missing class never matches anything but itself.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

/// Source of direct class relationships.
///
/// All names are normalized: no leading namespace separator.
pub trait ClassInfoProvider {
    /// Returns the parent class of `class`.
    fn parent_of(&self, class: &str) -> Option<Arc<str>>;

    /// Returns the interfaces `class` implements directly.
    ///
    /// For an interface, returns the interfaces it extends.
    fn interfaces_of(&self, class: &str) -> Vec<Arc<str>>;

    /// Returns the traits a class or trait uses directly.
    fn traits_used_by(&self, class: &str) -> Vec<Arc<str>>;

    /// Returns true if instances of `class` can be iterated.
    fn is_iterable(&self, _class: &str) -> bool {
        false
    }

    /// Returns true if instances of `class` can be invoked.
    fn is_invocable(&self, _class: &str) -> bool {
        false
    }
}

impl<P: ClassInfoProvider + ?Sized> ClassInfoProvider for &P {
    fn parent_of(&self, class: &str) -> Option<Arc<str>> {
        (**self).parent_of(class)
    }

    fn interfaces_of(&self, class: &str) -> Vec<Arc<str>> {
        (**self).interfaces_of(class)
    }

    fn traits_used_by(&self, class: &str) -> Vec<Arc<str>> {
        (**self).traits_used_by(class)
    }

    fn is_iterable(&self, class: &str) -> bool {
        (**self).is_iterable(class)
    }

    fn is_invocable(&self, class: &str) -> bool {
        (**self).is_invocable(class)
    }
}

fn normalize(name: &str) -> Arc<str> {
    let name = name.trim();
    name.strip_prefix('\\').unwrap_or(name).into()
}

/// Declaration of a class, interface or trait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    /// Normalized name.
    pub name: Arc<str>,
    /// Parent class, if any.
    pub parent: Option<Arc<str>>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<Arc<str>>,
    /// Directly used traits.
    pub traits: Vec<Arc<str>>,
    /// Instances can be iterated.
    pub iterable: bool,
    /// Instances can be invoked.
    pub invocable: bool,
}

impl ClassDef {
    /// Creates a declaration with no relationships.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize(name),
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            iterable: false,
            invocable: false,
        }
    }

    /// Sets the parent class.
    #[must_use]
    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(normalize(parent));
        self
    }

    /// Adds an implemented (or extended) interface.
    #[must_use]
    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(normalize(interface));
        self
    }

    /// Adds a used trait.
    #[must_use]
    pub fn uses(mut self, used: &str) -> Self {
        self.traits.push(normalize(used));
        self
    }

    /// Marks instances as iterable.
    #[must_use]
    pub fn iterable(mut self) -> Self {
        self.iterable = true;
        self
    }

    /// Marks instances as invocable.
    #[must_use]
    pub fn invocable(mut self) -> Self {
        self.invocable = true;
        self
    }
}

/// A [`ClassInfoProvider`] backed by explicit declarations.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<Arc<str>, ClassDef>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration, replacing any previous one of the same name.
    pub fn register(&mut self, def: ClassDef) {
        self.classes.insert(def.name.clone(), def);
    }

    /// Builder method to register a declaration.
    #[must_use]
    pub fn with(mut self, def: ClassDef) -> Self {
        self.register(def);
        self
    }

    /// Looks up a declaration.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassInfoProvider for ClassRegistry {
    fn parent_of(&self, class: &str) -> Option<Arc<str>> {
        self.get(class).and_then(|def| def.parent.clone())
    }

    fn interfaces_of(&self, class: &str) -> Vec<Arc<str>> {
        self.get(class)
            .map(|def| def.interfaces.clone())
            .unwrap_or_default()
    }

    fn traits_used_by(&self, class: &str) -> Vec<Arc<str>> {
        self.get(class)
            .map(|def| def.traits.clone())
            .unwrap_or_default()
    }

    fn is_iterable(&self, class: &str) -> bool {
        self.get(class).is_some_and(|def| def.iterable)
    }

    fn is_invocable(&self, class: &str) -> bool {
        self.get(class).is_some_and(|def| def.invocable)
    }
}

/// Everything a class is, and every trait it carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lineage {
    /// The class itself, its ancestors, and all their interfaces.
    supertypes: HashSet<Arc<str>>,
    /// Traits used by the class or any ancestor, transitively.
    traits: HashSet<Arc<str>>,
    iterable: bool,
    invocable: bool,
}

impl Lineage {
    /// Returns true if the class is, extends, or implements `name`.
    #[must_use]
    pub fn is_a(&self, name: &str) -> bool {
        self.supertypes.contains(name)
    }

    /// Returns true if `name` is a trait used anywhere in the lineage.
    #[must_use]
    pub fn uses_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    /// Returns true if any supertype is iterable.
    #[must_use]
    pub fn is_iterable(&self) -> bool {
        self.iterable
    }

    /// Returns true if any supertype is invocable.
    #[must_use]
    pub fn is_invocable(&self) -> bool {
        self.invocable
    }

    /// Iterates over the supertypes, in no particular order.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.supertypes.iter().map(|name| &**name)
    }

    /// Iterates over the traits, in no particular order.
    pub fn traits(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(|name| &**name)
    }
}

/// Memoizing view of a [`ClassInfoProvider`].
///
/// Lineages are assumed stable once computed. It is not thread-safe; use
/// one hierarchy per thread.
#[derive(Debug)]
pub struct ClassHierarchy<P> {
    provider: P,
    cache: RefCell<HashMap<Arc<str>, Rc<Lineage>>>,
}

impl<P: ClassInfoProvider> ClassHierarchy<P> {
    /// Creates a hierarchy over the given provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the underlying provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the number of classes with a cached lineage.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns the lineage of `class`, computing it on first use.
    pub fn lineage(&self, class: &str) -> Rc<Lineage> {
        if let Some(lineage) = self.cache.borrow().get(class) {
            return Rc::clone(lineage);
        }
        let lineage = Rc::new(self.compute(class));
        trace!(
            class,
            supertypes = lineage.supertypes.len(),
            traits = lineage.traits.len(),
            "computed class lineage"
        );
        self.cache
            .borrow_mut()
            .insert(class.into(), Rc::clone(&lineage));
        lineage
    }

    fn compute(&self, class: &str) -> Lineage {
        let mut lineage = Lineage::default();
        let mut chain: HashSet<Arc<str>> = HashSet::new();
        let mut current: Option<Arc<str>> = Some(class.into());

        while let Some(ancestor) = current {
            // A parent chain that loops back on itself stops here.
            if !chain.insert(Arc::clone(&ancestor)) {
                break;
            }
            lineage.supertypes.insert(Arc::clone(&ancestor));

            let mut interfaces = self.provider.interfaces_of(&ancestor);
            while let Some(interface) = interfaces.pop() {
                if lineage.supertypes.insert(Arc::clone(&interface)) {
                    interfaces.extend(self.provider.interfaces_of(&interface));
                }
            }

            let mut traits = self.provider.traits_used_by(&ancestor);
            while let Some(used) = traits.pop() {
                if lineage.traits.insert(Arc::clone(&used)) {
                    traits.extend(self.provider.traits_used_by(&used));
                }
            }

            current = self.provider.parent_of(&ancestor);
        }

        lineage.iterable = lineage
            .supertypes
            .iter()
            .any(|name| self.provider.is_iterable(name));
        lineage.invocable = lineage
            .supertypes
            .iter()
            .any(|name| self.provider.is_invocable(name));
        lineage
    }
}
