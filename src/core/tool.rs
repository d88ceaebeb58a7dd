//! The generation tools Muse offers and their fixed presentation data.

use clap::ValueEnum;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Conversation,
    Code,
}

const CONVERSATION_PLACEHOLDERS: &[&str] = &[
    "Can you explain the concept of black holes and their influence on surrounding space?",
    "What are the fundamental principles of quantum mechanics?",
    "How does photosynthesis work in plants?",
    "Explain the theory of relativity in simple terms.",
    "How do computers execute programs through machine code?",
    "Discuss the major events of World War II and their impact.",
    "Explain the process of how stars are formed and evolve.",
    "What is the role of the United Nations in maintaining global peace?",
    "Discuss the key elements of a healthy lifestyle, including diet and exercise.",
    "Explain the difference between classical and operant conditioning in psychology.",
    "How does globalization affect economies and cultures?",
    "Discuss the causes and consequences of the Industrial Revolution.",
    "Explain the structure and function of the human cardiovascular system.",
    "What is the importance of the periodic table in chemistry?",
    "Discuss the principles of supply and demand in economics.",
    "Explain the concept of civil rights and their historical context.",
    "How do different forms of government, like democracy and monarchy, work?",
    "Discuss the impact of social media on communication and society.",
    "Explain the process of artistic creativity and its significance.",
    "What is the role of the immune system in protecting the body from diseases?",
];

const CODE_PLACEHOLDERS: &[&str] = &[
    "Generate a basic HTML page with a doctype, <html>, <head>, and <body> elements.",
    "Create a JavaScript function that adds two numbers and returns the result.",
    "Generate CSS code for a flexbox layout with three div elements horizontally aligned.",
    "Create a Python class named 'Person' with attributes for 'name' and 'age'.",
    "Write an SQL query to retrieve all records from a 'users' table.",
    "Create a React functional component called 'Button' that renders a button element.",
    "Write Java code to generate a random integer between 1 and 100.",
    "Create a PHP form that accepts user input for 'name' and 'email' and submits to 'process.php'.",
    "Generate a TypeScript interface named 'Product' with properties 'id', 'name', and 'price'.",
    "Write a Bash script that lists all files in the current directory.",
    "Create a C# class called 'Car' with properties 'Make', 'Model', and 'Year'.",
    "Generate an Angular component named 'ProductList' that displays a list of products.",
    "Write a Swift function called 'calculateArea' that calculates the area of a rectangle.",
    "Create a Ruby module named 'MathUtils' with a method for finding the factorial of a number.",
    "Generate a Dockerfile for a Node.js application with necessary dependencies.",
    "Write a PowerShell script that renames all .txt files in a directory.",
    "Create an Android Activity named 'MainActivity' with a layout file 'activity_main.xml'.",
    "Generate a GraphQL query to retrieve a user's profile information.",
    "Write a Perl script that counts the number of lines in a text file.",
    "Create a Vue.js component called 'Counter' that increments and displays a counter value.",
];

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Conversation, Tool::Code];

    pub fn title(self) -> &'static str {
        match self {
            Tool::Conversation => "Conversation",
            Tool::Code => "Code Generation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Conversation => "Our most advanced conversation model.",
            Tool::Code => "Generate code using the newest AI tools.",
        }
    }

    /// Path of the tool's endpoint, relative to the service base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Tool::Conversation => "/api/conversation",
            Tool::Code => "/api/code",
        }
    }

    pub fn empty_label(self) -> &'static str {
        match self {
            Tool::Conversation => "No conversation started.",
            Tool::Code => "No code generated.",
        }
    }

    /// Whether replies are rendered as markdown rather than plain text.
    pub fn renders_markdown(self) -> bool {
        matches!(self, Tool::Code)
    }

    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            Tool::Conversation => CONVERSATION_PLACEHOLDERS,
            Tool::Code => CODE_PLACEHOLDERS,
        }
    }

    /// Picks one example prompt at random.
    pub fn random_placeholder(self) -> &'static str {
        self.placeholders()
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }

    /// Cycles to the next tool (wraps around)
    pub fn next(self) -> Tool {
        match self {
            Tool::Conversation => Tool::Code,
            Tool::Code => Tool::Conversation,
        }
    }

    pub fn parse(name: &str) -> Option<Tool> {
        <Tool as ValueEnum>::from_str(name, true).ok()
    }
}
