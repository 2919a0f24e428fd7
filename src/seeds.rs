//! Built-in materials so the service is useful without a catalog file.

use crate::domain::Material;

fn seed(id: u64, title: &str, url: &str, kind: &str, tags: &[&str]) -> Material {
  Material {
    id,
    user_id: None,
    class_id: None,
    title: title.into(),
    content_url: url.into(),
    kind: kind.into(),
    topic_tags: tags.iter().map(|t| t.to_string()).collect(),
  }
}

pub fn seed_materials() -> Vec<Material> {
  vec![
    seed(1, "Mathematics Fundamentals", "https://learnhub.local/materials/math-fundamentals", "course", &["arithmetic", "fractions"]),
    seed(2, "Introduction to Physics", "https://learnhub.local/materials/intro-physics", "course", &["mechanics", "units"]),
    seed(3, "Programming Basics", "https://learnhub.local/materials/programming-basics", "course", &["variables", "loops"]),
    seed(4, "Shapes and Angles", "https://learnhub.local/materials/shapes-and-angles", "video", &["geometry"]),
    seed(5, "Working with Fractions", "https://learnhub.local/materials/working-with-fractions", "worksheet", &["fractions"]),
  ]
}
