//! 文档 Prompt 构建服务
//!
//! 每种文档类型对应一种 prompt 风格：
//!
//! - `function`：结构化输出（JSON）
//! - `readme`：角色扮演（技术写作者）
//! - `explanation`：逐步推理
//! - `architecture`：少样本示例
//!
//! 未知类型回退到带约束的通用文档 prompt。

use crate::llm::ChatMessage;

const FUNCTION_DOCS_PROMPT: &str = r#"You are a senior software engineer writing API documentation.

Analyze this {language} code and generate comprehensive function/method documentation.

Code:
```{language}
{code}
```

YOUR RESPONSE MUST FOLLOW THIS EXACT JSON STRUCTURE:
{
  "functions": [
    {
      "name": "function_name",
      "purpose": "clear one-line description",
      "parameters": [
        {
          "name": "param_name",
          "type": "param_type",
          "description": "what it does"
        }
      ],
      "returns": {
        "type": "return_type",
        "description": "what it returns"
      },
      "examples": [
        "usage example 1",
        "usage example 2"
      ],
      "complexity": "time and space complexity if applicable",
      "edge_cases": ["edge case 1", "edge case 2"]
    }
  ]
}

CRITICAL REQUIREMENTS:
- Output ONLY valid JSON, no other text
- Include ALL functions/methods found
- Be specific and technical
- Include practical examples
"#;

const README_PROMPT: &str = r#"You are a technical writer creating professional GitHub README documentation.

CONTEXT:
- Language: {language}
- Audience: Developers who want to use this code
- Goal: Create a complete, professional README

Code to document:
```{language}
{code}
```

Generate a comprehensive README.md that includes:

# Project Title
[Infer from code]

## Description
[What this code does - 2-3 sentences]

## Features
- [Key feature 1]
- [Key feature 2]
- [Key feature 3]

## Installation
```bash
[Step-by-step installation commands]
```

## Usage
```{language}
[Clear usage examples with actual code]
```

## API Reference
[If applicable - document main functions/classes]

## Requirements
[List dependencies]

## Examples
[2-3 practical examples]

## Contributing
[Standard contribution guidelines]

## License
[Suggest appropriate license]

REQUIREMENTS:
- Use proper Markdown formatting
- Be comprehensive but concise
- Include code blocks with syntax highlighting
- Make it copy-paste ready
"#;

const EXPLANATION_PROMPT: &str = r#"You are a patient programming instructor explaining code to a junior developer.

Code to explain:
```{language}
{code}
```

Use this STEP-BY-STEP analysis approach:

**Step 1: High-Level Overview**
First, explain what this code does in one paragraph, as if explaining to a non-programmer.

**Step 2: Component Breakdown**
Then, break down the code into logical sections and explain each part:
- What is this section?
- Why does it exist?
- How does it work?

**Step 3: Line-by-Line Analysis**
For complex or critical lines, provide detailed explanations:
- Line [X]: [What it does and why]
- Line [Y]: [What it does and why]

**Step 4: Data Flow**
Trace how data moves through the code:
- Input: [What comes in]
- Processing: [What happens to it]
- Output: [What comes out]

**Step 5: Key Concepts**
Identify and explain any important programming concepts used:
- [Concept 1]: [Explanation]
- [Concept 2]: [Explanation]

**Step 6: Potential Issues**
Note any edge cases, gotchas, or areas for improvement.

FORMAT: Use clear headers, bullet points, and be conversational but technical.
"#;

const ARCHITECTURE_PROMPT: &str = r#"You are a software architect creating system design documentation.

EXAMPLE OF GOOD ARCHITECTURE DOCUMENTATION:
```
## System Architecture

### Overview
This is a RESTful API service built with FastAPI that handles user authentication.

### Components
1. **API Layer** (main.py)
   - Handles HTTP requests
   - Routes: /login, /register, /logout
   
2. **Business Logic** (auth.py)
   - Password hashing with bcrypt
   - JWT token generation
   
3. **Data Layer** (database.py)
   - PostgreSQL connection
   - User model with SQLAlchemy

### Data Flow
Request → API Layer → Validation → Business Logic → Database → Response

### Key Design Decisions
- Used JWT for stateless authentication
- Bcrypt with cost factor 12 for security
- Connection pooling for database efficiency
```

NOW, analyze this {language} code and create similar architecture documentation:
```{language}
{code}
```

YOUR ARCHITECTURE DOCUMENTATION MUST INCLUDE:

## System Architecture

### Overview
[High-level description]

### Components
[List major components with their responsibilities]

### Data Flow
[How data moves through the system]

### Key Design Decisions
[Why certain approaches were chosen]

### Technology Stack
[Libraries/frameworks used and why]

### Scalability Considerations
[How this could scale]

### Potential Improvements
[Architectural enhancements for production]

FORMAT: Use Markdown, be detailed but clear.
"#;

const GENERAL_PROMPT: &str = r#"Generate comprehensive technical documentation for this {language} code.

Code:
```{language}
{code}
```

MANDATORY CONSTRAINTS:
✓ Length: 200-400 words
✓ Technical level: Intermediate developer
✓ Format: Markdown with proper headers
✓ Include: Purpose, usage, and examples
✓ Tone: Professional but approachable
✗ Do NOT: Include installation steps unless code imports external libraries
✗ Do NOT: Be overly verbose or use filler words
✗ Do NOT: Make assumptions about code you can't see

STRUCTURE:
1. Brief summary (2-3 sentences)
2. Detailed explanation
3. Usage example
4. Important notes or caveats

Begin your documentation now:
"#;

/// Prompt 服务
#[derive(Debug, Default)]
pub struct PromptService;

impl PromptService {
    pub fn new() -> Self {
        Self
    }

    /// 按文档类型选择模板
    fn template_for(doc_type: &str) -> &'static str {
        match doc_type {
            "function" => FUNCTION_DOCS_PROMPT,
            "readme" => README_PROMPT,
            "explanation" => EXPLANATION_PROMPT,
            "architecture" => ARCHITECTURE_PROMPT,
            _ => GENERAL_PROMPT,
        }
    }

    /// 构建文档生成 prompt
    pub fn build_documentation_prompt(&self, code: &str, language: &str, doc_type: &str) -> String {
        render(
            Self::template_for(doc_type),
            &[("language", language), ("code", code)],
        )
    }

    /// 构建发送给 LLM 的消息列表（单条 user 消息）
    pub fn build_messages(&self, code: &str, language: &str, doc_type: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::user(self.build_documentation_prompt(code, language, doc_type))]
    }
}

/// 单遍替换 `{name}` 占位符
///
/// 替换结果不会被再次扫描，因此代码中出现的 `{language}` 之类文本保持原样；
/// 未知的花括号内容原样输出。
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let matched = vars
            .iter()
            .find(|(name, _)| after.starts_with(name) && after[name.len()..].starts_with('}'));
        match matched {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
