/// Navigation collaborator - opens an external URL for the viewer.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, url: &str);
}
