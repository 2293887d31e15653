//! Add-creator form: text buffers for each field and conversion into a
//! validated [`NewCreator`].

use std::str::FromStr;

use roster_core::creator::{NewCreator, Niche, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Handle,
  Followers,
  ProfileUrl,
  Email,
  Platforms,
  Niches,
}

impl Field {
  pub const ALL: [Self; 7] = [
    Self::Name,
    Self::Handle,
    Self::Followers,
    Self::ProfileUrl,
    Self::Email,
    Self::Platforms,
    Self::Niches,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Handle => "Handle (@)",
      Self::Followers => "Followers",
      Self::ProfileUrl => "Profile URL",
      Self::Email => "Email (optional)",
      Self::Platforms => "Platforms",
      Self::Niches => "Niches",
    }
  }

  pub fn hint(self) -> &'static str {
    match self {
      Self::Platforms => "comma-separated: Instagram, TikTok, YouTube, Blog",
      Self::Niches => "comma-separated, e.g. Food, Drinks, Lifestyle",
      Self::ProfileUrl => "https://…",
      _ => "",
    }
  }
}

/// Form state. `focus` indexes [`Field::ALL`].
#[derive(Debug, Clone, Default)]
pub struct CreatorForm {
  values:       [String; 7],
  pub focus:    usize,
  /// Problems from the last submit attempt.
  pub problems: Vec<String>,
}

impl CreatorForm {
  pub fn value(&self, field: Field) -> &str { &self.values[field as usize] }

  pub fn focused(&self) -> Field { Field::ALL[self.focus] }

  pub fn focus_next(&mut self) { self.focus = (self.focus + 1) % Field::ALL.len(); }

  pub fn focus_previous(&mut self) {
    self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
  }

  pub fn push(&mut self, c: char) { self.values[self.focus].push(c); }

  pub fn pop(&mut self) { self.values[self.focus].pop(); }

  /// Parse and validate every field. On failure, the error lists one message
  /// per problem.
  pub fn payload(&self) -> Result<NewCreator, Vec<String>> {
    let mut problems = Vec::new();

    let raw_followers = self.value(Field::Followers).trim().replace([',', '_'], "");
    let follower_count = if raw_followers.is_empty() {
      Some(0)
    } else {
      raw_followers.parse::<u64>().ok()
    };
    if follower_count.is_none() {
      problems.push(format!("followers: {raw_followers:?} is not a number"));
    }

    let platforms = parse_list::<Platform>(self.value(Field::Platforms), "platform", &mut problems);
    let niches = parse_list::<Niche>(self.value(Field::Niches), "niche", &mut problems);

    let email = self.value(Field::Email).trim();
    let input = NewCreator {
      email: (!email.is_empty()).then(|| email.to_owned()),
      ..NewCreator::new(
        self.value(Field::Name).trim(),
        self.value(Field::Handle).trim(),
        // A parse failure is already reported; 1 keeps it from doubling up.
        follower_count.unwrap_or(1),
        self.value(Field::ProfileUrl).trim(),
        platforms,
        niches,
      )
    };

    problems.extend(input.problems().iter().map(ToString::to_string));
    if problems.is_empty() {
      Ok(input)
    } else {
      Err(problems)
    }
  }
}

/// Split a comma-separated list, parse each entry, and record unknown names.
/// Duplicates are dropped.
fn parse_list<T>(raw: &str, what: &str, problems: &mut Vec<String>) -> Vec<T>
where
  T: FromStr + PartialEq,
{
  let mut out = Vec::new();
  for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
    match item.parse::<T>() {
      Ok(value) if !out.contains(&value) => out.push(value),
      Ok(_) => {}
      Err(_) => problems.push(format!("unknown {what}: {item}")),
    }
  }
  out
}
