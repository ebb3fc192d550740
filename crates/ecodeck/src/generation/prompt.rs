use serde_json::{Value, json};

pub const TOPIC: &str = "Green Chemistry's Contribution to Energy Efficiency Design";

pub const SLIDE_COUNT: usize = 10;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a world-class expert in Sustainable Chemistry and Chemical Engineering.";

/// Subtopics in the order the slides should appear.
pub const OUTLINE: [&str; SLIDE_COUNT] = [
    "Introduction to Green Chemistry principles relevant to energy.",
    "Designing chemicals for energy efficiency.",
    "Catalysis and energy reduction.",
    "Solvent-free processes.",
    "Renewable feedstocks.",
    "Case Study: Solar or Battery technology advancements via green chemistry.",
    "SPECIFIC SLIDE: China's contribution to Green Chemistry and Energy Efficiency \
     (policies, major research, or industrial shifts).",
    "Industrial applications and scaling.",
    "Future challenges and opportunities.",
    "Conclusion and Call to Action.",
];

/// The user prompt sent with every request.
pub fn user_prompt() -> String {
    let mut prompt = format!(
        "Create a professional, modern {SLIDE_COUNT}-slide presentation about \"{TOPIC}\".\n\n\
         The content should cover:\n"
    );
    for (i, item) in OUTLINE.iter().enumerate() {
        prompt.push_str(&format!("{}. {item}\n", i + 1));
    }
    prompt.push_str(
        "\nTone: Academic yet accessible, inspiring, and sustainability-focused.\n\
         Ensure the JSON structure matches the schema exactly.",
    );
    prompt
}

/// Structured-output schema: an array of slide objects with all five fields required.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "The headline of the slide."
                },
                "bullets": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "3-4 concise bullet points for the slide body."
                },
                "highlight": {
                    "type": "STRING",
                    "description": "A short, punchy key takeaway or statistic."
                },
                "imageKeyword": {
                    "type": "STRING",
                    "description": "A single English word describing the visual theme \
                                    (e.g. 'laboratory', 'solar', 'china', 'molecule')."
                },
                "notes": {
                    "type": "STRING",
                    "description": "Speaker notes explaining the slide in detail."
                }
            },
            "required": ["title", "bullets", "highlight", "imageKeyword", "notes"]
        }
    })
}

/// Full `generateContent` request body.
pub fn request_body() -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": user_prompt() }]
        }],
        "systemInstruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}
