#![cfg(test)]

use chrono::NaiveDate;

use crate::record::{Post, ReadingTime, Service, Testimonial};

pub const POST_DATA_MD: &str = "---
title: Spring Cleaning Checklist
date: 2024-03-18
author: Dana Reyes
excerpt: Everything we tick off before the warm season starts.
categories:
  - Home
  - Tips
tags:
  - cleaning
  - checklist
featured: true
---
Spring is the best time to reset the house. Here is the list our crew follows.

<!-- more -->

## Kitchen

| Task | Time |
| ---- | ---- |
| Oven | 1h   |

~~Skip the windows~~ Never skip the windows.
";

pub const POST_BAD_DATE_MD: &str = "---
title: Broken Date
date: March 3rd
author: Dana Reyes
excerpt: This one never makes it.
---
Body.
";

pub const SERVICE_PHOTO_MD: &str = "+++
title = \"Photography Services\"
short_description = \"Portraits, events and product shots.\"
featured_image = \"/images/services/photo.jpg\"
icon = \"camera\"
order = 1
features = [\"Studio sessions\", \"On-location shoots\"]

[pricing]
starting_price = 150
currency = \"USD\"
billing_period = \"session\"
+++
We bring the lights.
";

pub const SERVICE_DESIGN_MD: &str = "---
title: Web Design
short_description: Sites that load fast and convert.
featured_image: /images/services/web.jpg
icon: monitor
order: 0
featured: true
benefits:
  - More leads
---
Built from scratch for every client.
";

pub fn testimonial_md(rating: &str) -> String {
    format!("---
author: Priya Natarajan
position: Owner
company: Bloom Bakery
content: The photos doubled our online orders.
rating: {}
order: 0
services:
  - photography
---
", rating)
}

pub fn post(slug: &str, date: (i32, u32, u32), categories: &[&str], tags: &[&str]) -> Post {
    Post {
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        updated: None,
        author: "Dana Reyes".to_string(),
        excerpt: format!("About {}", slug),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        featured: false,
        image: None,
        reading_time: ReadingTime(1),
        body: String::new(),
        html: String::new(),
    }
}

pub fn service(slug: &str, order: u32) -> Service {
    Service {
        slug: slug.to_string(),
        title: slug.to_string(),
        short_description: format!("{} for small business", slug),
        featured_image: format!("/images/{}.jpg", slug),
        icon: "star".to_string(),
        order,
        features: vec![],
        benefits: vec![],
        pricing: None,
        featured: false,
        body: String::new(),
        html: String::new(),
    }
}

pub fn testimonial(id: &str, author: &str, rating: u8, services: &[&str]) -> Testimonial {
    Testimonial {
        id: id.to_string(),
        author: author.to_string(),
        position: "Owner".to_string(),
        company: None,
        image: None,
        content: "Great to work with.".to_string(),
        rating,
        order: 0,
        featured: false,
        services: services.iter().map(|s| s.to_string()).collect(),
        body: String::new(),
        html: String::new(),
    }
}
