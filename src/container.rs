//! Resolution of the host element the calendar is drawn into

use crate::error::CalendarError;
use std::fmt;

/// Finds host elements by selector
pub trait ContainerLookup<T> {
    fn query(&self, selector: &str) -> Option<T>;
}

/// A lookup that matches nothing, for hosts that only pass elements or
/// resolvers
impl<T> ContainerLookup<T> for () {
    fn query(&self, _selector: &str) -> Option<T> {
        None
    }
}

pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

pub type ContainerResolver<T> = Box<dyn FnOnce() -> Result<Option<T>, ResolverError>>;

/// Where to draw the calendar: an element, a selector looked up once at
/// construction, or a function producing the element
pub enum Container<T> {
    Element(T),
    Selector(String),
    Resolver(ContainerResolver<T>),
}

impl<T> Container<T> {
    pub fn resolver<F>(func: F) -> Container<T>
    where
        F: FnOnce() -> Result<Option<T>, ResolverError> + 'static,
    {
        Container::Resolver(Box::new(func))
    }

    pub fn resolve<L>(self, lookup: &L) -> Result<T, CalendarError>
    where
        L: ContainerLookup<T> + ?Sized,
    {
        match self {
            Container::Element(elem) => Ok(elem),
            Container::Selector(selector) => lookup
                .query(&selector)
                .ok_or(CalendarError::ContainerNotFound(selector)),
            Container::Resolver(func) => func()
                .map_err(CalendarError::ContainerResolver)?
                .ok_or(CalendarError::ContainerUnresolved),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Element(elem) => f.debug_tuple("Element").field(elem).finish(),
            Container::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Container::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page;

    impl ContainerLookup<&'static str> for Page {
        fn query(&self, selector: &str) -> Option<&'static str> {
            (selector == "#calendar").then_some("div#calendar")
        }
    }

    #[test]
    fn test_resolve_element() {
        assert_eq!(Container::Element(7).resolve(&()).unwrap(), 7);
    }

    #[test]
    fn test_resolve_selector() {
        let elem = Container::Selector(String::from("#calendar"))
            .resolve(&Page)
            .unwrap();
        assert_eq!(elem, "div#calendar");
        let r = Container::Selector(String::from("#missing")).resolve(&Page);
        assert!(matches!(r, Err(CalendarError::ContainerNotFound(s)) if s == "#missing"));
    }

    #[test]
    fn test_resolve_function() {
        let elem = Container::resolver(|| Ok(Some(42))).resolve(&()).unwrap();
        assert_eq!(elem, 42);
        let r = Container::<u32>::resolver(|| Ok(None)).resolve(&());
        assert!(matches!(r, Err(CalendarError::ContainerUnresolved)));
        let r = Container::<u32>::resolver(|| Err("no document".into())).resolve(&());
        assert!(matches!(r, Err(CalendarError::ContainerResolver(_))));
    }
}
