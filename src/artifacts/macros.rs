/// Memoizes an async load in a `tokio::sync::OnceCell<Arc<T>>`.
///
/// The first caller runs the block; concurrent callers wait on the same
/// initialization instead of starting their own. A block that fails leaves the
/// cell empty, so the next call retries.
///
/// # Arguments
/// * `$cell`: The `OnceCell<Arc<T>>` that holds the loaded value.
/// * `$block`: An async block producing `Result<Arc<T>, E>`.
///
/// # Example
/// ```rust,ignore
/// let catalog = memoized!(self.catalog, async {
///     Ok::<_, AppError>(Arc::new(load_catalog().await?))
/// })?;
/// ```
#[macro_export]
macro_rules! memoized {
    ($cell:expr, $block:expr) => {{
        $cell
            .get_or_try_init(|| $block)
            .await
            .map(std::sync::Arc::clone)
    }};
}
