/// Builds a [`RouterService`](crate::RouterService) from a route list.
///
/// ```ignore
/// let service = router_service! {
///     GET "/fruits" => list,
///     "GET, HEAD" "/fruits/{name}" => show,
///     * "/health" => health;
///     _ => not_found
/// };
/// ```
#[macro_export]
macro_rules! router_service {
    {@methods $methods:literal} => { $methods };
    {@methods $methods:tt} => { stringify!($methods) };

    {$($methods:tt $pattern:expr => $handler:expr),+ $(,)? ; _ => $not_found:expr} => {{
        let mut __router: $crate::Router<$crate::BoxHandler<_>> = $crate::Router::new();
        $(__router.route($pattern, $crate::router_service!(@methods $methods), $handler);)+
        __router.into_service().not_found($not_found)
    }};

    {$($methods:tt $pattern:expr => $handler:expr),+ $(,)?} => {{
        let mut __router: $crate::Router<$crate::BoxHandler<_>> = $crate::Router::new();
        $(__router.route($pattern, $crate::router_service!(@methods $methods), $handler);)+
        __router.into_service()
    }};
}
