//! Closed mapping from icon keys used in content to renderable glyphs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Glyphs a client knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Code,
    Terminal,
    Palette,
    Boxes,
    Database,
    Brain,
    Sparkles,
    Wrench,
    Github,
    Linkedin,
    Twitter,
    Mail,
    Download,
}

impl Glyph {
    pub fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Terminal => "terminal",
            Self::Palette => "palette",
            Self::Boxes => "boxes",
            Self::Database => "database",
            Self::Brain => "brain",
            Self::Sparkles => "sparkles",
            Self::Wrench => "wrench",
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Mail => "mail",
            Self::Download => "download",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    // social and call-to-action
    Github,
    Linkedin,
    Twitter,
    Mail,
    Download,
    // frontend
    React,
    Nextjs,
    Typescript,
    Javascript,
    Tailwind,
    Css,
    Html,
    Shadcn,
    // backend
    Nodejs,
    Express,
    Python,
    Django,
    Flask,
    Api,
    // ai
    Ai,
    Ml,
    Llm,
    Gemini,
    Openai,
    Langchain,
    Tensorflow,
    Pytorch,
    Huggingface,
    // databases
    Mongodb,
    Postgresql,
    Mysql,
    Prisma,
    // tools
    Git,
    Docker,
    Vercel,
    Linux,
    Vscode,
}

impl IconKey {
    /// Parses a content key, ignoring case and whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let parsed = match key.as_str() {
            "github" => Self::Github,
            "linkedin" => Self::Linkedin,
            "twitter" => Self::Twitter,
            "mail" | "email" => Self::Mail,
            "download" => Self::Download,
            "react" => Self::React,
            "nextjs" => Self::Nextjs,
            "typescript" => Self::Typescript,
            "javascript" => Self::Javascript,
            "tailwind" => Self::Tailwind,
            "css" => Self::Css,
            "html" => Self::Html,
            "shadcn" => Self::Shadcn,
            "nodejs" => Self::Nodejs,
            "express" => Self::Express,
            "python" => Self::Python,
            "django" => Self::Django,
            "flask" => Self::Flask,
            "api" => Self::Api,
            "ai" => Self::Ai,
            "ml" => Self::Ml,
            "llm" => Self::Llm,
            "gemini" => Self::Gemini,
            "openai" => Self::Openai,
            "langchain" => Self::Langchain,
            "tensorflow" => Self::Tensorflow,
            "pytorch" => Self::Pytorch,
            "huggingface" => Self::Huggingface,
            "mongodb" => Self::Mongodb,
            "postgresql" => Self::Postgresql,
            "mysql" => Self::Mysql,
            "prisma" => Self::Prisma,
            "git" => Self::Git,
            "docker" => Self::Docker,
            "vercel" => Self::Vercel,
            "linux" => Self::Linux,
            "vscode" => Self::Vscode,
            _ => return None,
        };
        Some(parsed)
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Self::Github => Glyph::Github,
            Self::Linkedin => Glyph::Linkedin,
            Self::Twitter => Glyph::Twitter,
            Self::Mail => Glyph::Mail,
            Self::Download => Glyph::Download,
            Self::React | Self::Nextjs | Self::Html | Self::Vscode => Glyph::Code,
            Self::Typescript
            | Self::Javascript
            | Self::Nodejs
            | Self::Python
            | Self::Linux => Glyph::Terminal,
            Self::Tailwind | Self::Css => Glyph::Palette,
            Self::Shadcn | Self::Docker => Glyph::Boxes,
            Self::Express
            | Self::Django
            | Self::Flask
            | Self::Api
            | Self::Mongodb
            | Self::Postgresql
            | Self::Mysql
            | Self::Prisma => Glyph::Database,
            Self::Ai | Self::Ml | Self::Langchain | Self::Tensorflow | Self::Pytorch => {
                Glyph::Brain
            }
            Self::Llm | Self::Gemini | Self::Openai | Self::Huggingface => Glyph::Sparkles,
            Self::Git | Self::Vercel => Glyph::Wrench,
        }
    }
}

impl FromStr for IconKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw).ok_or_else(|| format!("unknown icon key '{raw}'"))
    }
}

/// Glyph for a content key or display name; unknown keys draw as [`Glyph::Code`].
pub fn glyph_for(name: &str) -> Glyph {
    IconKey::parse(name).map_or(Glyph::Code, IconKey::glyph)
}
