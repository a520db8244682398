/// A resource whose backing memory can be released explicitly
pub trait Release {
    fn release(&mut self);
}

impl Release for wgpu::Buffer {
    fn release(&mut self) {
        self.destroy();
    }
}

impl Release for wgpu::Texture {
    fn release(&mut self) {
        self.destroy();
    }
}

/// Owns a releasable resource and releases it exactly once, either on
/// `dispose` or on drop.
#[derive(Debug)]
pub struct Disposable<T: Release> {
    inner: Option<T>,
}

impl<T: Release> Disposable<T> {
    pub fn new(resource: T) -> Self {
        Self {
            inner: Some(resource),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }

    /// Release now. Returns false if already released.
    pub fn dispose(&mut self) -> bool {
        match self.inner.take() {
            Some(mut resource) => {
                resource.release();
                true
            }
            None => false,
        }
    }

    /// Swap in a new resource, releasing the old one synchronously
    pub fn replace(&mut self, resource: T) {
        self.dispose();
        self.inner = Some(resource);
    }
}

impl<T: Release> Drop for Disposable<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<u32>>);

    impl Release for Counted {
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn dispose_is_idempotent() {
        let count = Rc::new(Cell::new(0));
        let mut res = Disposable::new(Counted(count.clone()));
        assert!(res.dispose());
        assert!(!res.dispose());
        drop(res);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_releases_once() {
        let count = Rc::new(Cell::new(0));
        drop(Disposable::new(Counted(count.clone())));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn replace_releases_previous() {
        let old = Rc::new(Cell::new(0));
        let new = Rc::new(Cell::new(0));
        let mut res = Disposable::new(Counted(old.clone()));
        res.replace(Counted(new.clone()));
        assert_eq!(old.get(), 1);
        assert_eq!(new.get(), 0);
        assert!(!res.is_disposed());
    }
}
