use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// How the stub answers a given catalog page.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum PageReply {
    Html(String),
    Status(u16),
    /// Holds the connection open this long before answering.
    Stall(Duration),
}

#[derive(Debug, Clone)]
pub struct Listing {
    pub title: String,
    pub href: String,
    pub price: String,
    pub rating: &'static str,
}

impl Listing {
    pub fn new(title: &str, price: f64, rating: &'static str) -> Self {
        let slug = title.to_lowercase().replace(' ', "-");
        Self {
            title: title.to_owned(),
            href: format!("{slug}/index.html"),
            price: format!("£{price:.2}"),
            rating,
        }
    }
}

pub fn listing_page(listings: &[Listing]) -> String {
    let mut items = String::new();
    for listing in listings {
        items.push_str(&format!(
            r#"
      <li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
        <article class="product_pod">
          <div class="image_container">
            <a href="{href}"><img src="../media/cache/x.jpg" alt="{title}" class="thumbnail"></a>
          </div>
          <p class="star-rating {rating}">
            <i class="icon-star"></i><i class="icon-star"></i>
          </p>
          <h3><a href="{href}" title="{title}">{title}</a></h3>
          <div class="product_price">
            <p class="price_color">{price}</p>
            <p class="instock availability">
              <i class="icon-ok"></i>

                In stock

            </p>
            <form><button type="submit" class="btn btn-primary btn-block">Add to basket</button></form>
          </div>
        </article>
      </li>"#,
            href = listing.href,
            title = listing.title,
            rating = listing.rating,
            price = listing.price,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en-us">
  <head><meta charset="utf-8"><title>All products | Books to Scrape - Sandbox</title></head>
  <body>
    <section>
      <ol class="row">{items}
      </ol>
    </section>
  </body>
</html>
"#
    )
}

/// Serves `/catalogue/page-{n}.html` from `pages[n - 1]`; anything else is 404.
pub struct CatalogStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CatalogStub {
    pub fn spawn(pages: Vec<PageReply>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start catalog stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let reply = request
                    .url()
                    .strip_prefix("/catalogue/page-")
                    .and_then(|rest| rest.strip_suffix(".html"))
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| pages.get(idx).cloned())
                    .unwrap_or(PageReply::Status(404));

                if let PageReply::Stall(hold) = reply {
                    thread::spawn(move || {
                        thread::sleep(hold);
                        let _ = request.respond(tiny_http::Response::from_string("too late"));
                    });
                    continue;
                }

                let response = match reply {
                    PageReply::Html(body) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/html; charset=utf-8"[..],
                        )
                        .expect("build header");
                        tiny_http::Response::from_string(body).with_header(header)
                    }
                    PageReply::Status(status) => {
                        tiny_http::Response::from_string("unavailable").with_status_code(status)
                    }
                    PageReply::Stall(_) => unreachable!("stalled replies are answered above"),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url_template(&self) -> String {
        format!("{}/catalogue/page-{{page}}.html", self.base_url)
    }

    pub fn link_base(&self) -> String {
        format!("{}/catalogue/", self.base_url)
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
