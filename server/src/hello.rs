use axum::response::Html;

pub async fn hello() -> Html<&'static str> {
    Html(concat!(
        "<!DOCTYPE html><title>gridql demo backend</title>",
        "<h1>gridql demo backend</h1>",
        "<p>GET or POST <code>/posts</code> with <code>page</code>, <code>limit</code>, <code>userId</code>, ",
        "<code>id</code> (a range such as <code>1-20</code>), <code>title</code>, <code>body</code>, ",
        "<code>searchText</code>, <code>sortField</code> and <code>sortOrder</code>.</p>",
        "<p><a href=\"/posts?id=1-20&amp;sortField=id&amp;sortOrder=-1&amp;limit=5\">/posts?id=1-20&amp;sortField=id&amp;sortOrder=-1&amp;limit=5</a></p>",
    ))
}
