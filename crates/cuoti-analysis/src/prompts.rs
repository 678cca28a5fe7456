//! System and user prompts for question analysis and practice generation.
//!
//! Both prompts pin the reply to the [`ParsedQuestion`](cuoti_core::ParsedQuestion)
//! JSON shape; the normalizer still assumes the model may ignore that.

use cuoti_core::{DifficultyLevel, Grade, Language};

use crate::normalizer::schema::REQUIRED_FIELDS;

const SHAPE_ZH: &str = r#"{
  "questionText": "题目原文（保留选项，数学公式使用 LaTeX，行内用 $...$）",
  "answerText": "正确答案",
  "analysis": "详细解析，分步骤说明解题思路",
  "knowledgePoints": ["知识点1", "知识点2"],
  "subject": "学科，例如 数学、物理、英语"
}"#;

const SHAPE_EN: &str = r#"{
  "questionText": "The full question text (keep options; math in LaTeX, inline as $...$)",
  "answerText": "The correct answer",
  "analysis": "A step-by-step explanation",
  "knowledgePoints": ["point 1", "point 2"],
  "subject": "Subject, e.g. Math, Physics, English"
}"#;

/// System prompt for turning a question photo into a record.
pub fn analyze_prompt(language: Language, grade: Option<Grade>, subject: Option<&str>) -> String {
    let subject = subject.map(str::trim).filter(|s| !s.is_empty());
    let mut prompt = String::new();

    match language {
        Language::Zh => {
            prompt.push_str(
                "你是一位经验丰富的中学教师。请识别图片中的题目，给出正确答案和详细解析，并提炼考查的知识点。\n",
            );
            if let Some(g) = grade {
                prompt.push_str(&format!(
                    "学生当前为{}年级，知识点只能使用{}及以前学过的内容。\n",
                    g.label(Language::Zh),
                    g.label(Language::Zh)
                ));
            }
            if let Some(s) = subject {
                prompt.push_str(&format!("题目所属学科为「{s}」，subject 字段请填写「{s}」。\n"));
            }
            prompt.push_str("只输出一个 JSON 对象，不要输出任何其他文字或 markdown 代码块。格式如下：\n");
            prompt.push_str(SHAPE_ZH);
            prompt.push_str(&format!(
                "\n必须包含字段：{}。knowledgePoints 必须是字符串数组。",
                REQUIRED_FIELDS.join("、")
            ));
        }
        Language::En => {
            prompt.push_str(
                "You are an experienced secondary-school teacher. Read the question in the image, \
                 give the correct answer with a detailed explanation, and list the knowledge points it tests.\n",
            );
            if let Some(g) = grade {
                prompt.push_str(&format!(
                    "The student is in {}. Only use knowledge points taught up to {}.\n",
                    g.label(Language::En),
                    g.label(Language::En)
                ));
            }
            if let Some(s) = subject {
                prompt.push_str(&format!(
                    "The question belongs to \"{s}\"; set the subject field to \"{s}\".\n"
                ));
            }
            prompt.push_str(
                "Output a single JSON object and nothing else, no prose and no markdown fences. Format:\n",
            );
            prompt.push_str(SHAPE_EN);
            prompt.push_str(&format!(
                "\nRequired fields: {}. knowledgePoints must be an array of strings.",
                REQUIRED_FIELDS.join(", ")
            ));
        }
    }

    prompt
}

/// System prompt for generating a new question on the same knowledge points.
pub fn similar_question_prompt(
    language: Language,
    original_question: &str,
    knowledge_points: &[String],
    difficulty: DifficultyLevel,
) -> String {
    let mut prompt = String::new();

    match language {
        Language::Zh => {
            prompt.push_str("你是一位经验丰富的中学教师，擅长编写练习题。\n");
            prompt.push_str(&format!(
                "请参考下面的原题，围绕相同的知识点（{}）编写一道新题目。\n",
                knowledge_points.join("、")
            ));
            prompt.push_str(difficulty_zh(difficulty));
            prompt.push_str("\n新题目不能与原题相同，需给出答案和详细解析。\n");
            prompt.push_str(&format!("原题：{original_question}\n"));
            prompt.push_str("只输出一个 JSON 对象，不要输出任何其他文字或 markdown 代码块。格式如下：\n");
            prompt.push_str(SHAPE_ZH);
        }
        Language::En => {
            prompt.push_str("You are an experienced secondary-school teacher who writes practice questions.\n");
            prompt.push_str(&format!(
                "Using the original question below as a reference, write one new question testing the same knowledge points ({}).\n",
                knowledge_points.join(", ")
            ));
            prompt.push_str(difficulty_en(difficulty));
            prompt.push_str(
                "\nThe new question must differ from the original and include an answer and a detailed explanation.\n",
            );
            prompt.push_str(&format!("Original question: {original_question}\n"));
            prompt.push_str(
                "Output a single JSON object and nothing else, no prose and no markdown fences. Format:\n",
            );
            prompt.push_str(SHAPE_EN);
        }
    }

    prompt
}

/// User message paired with [`similar_question_prompt`].
pub fn similar_question_user_prompt(original_question: &str, knowledge_points: &[String]) -> String {
    format!(
        "\nOriginal Question: \"{}\"\nKnowledge Points: {}\n",
        original_question,
        knowledge_points.join(", ")
    )
}

fn difficulty_zh(difficulty: DifficultyLevel) -> &'static str {
    match difficulty {
        DifficultyLevel::Easy => "难度：简单，比原题更基础，适合巩固概念。",
        DifficultyLevel::Medium => "难度：中等，与原题难度相当。",
        DifficultyLevel::Hard => "难度：较难，比原题多一步推理或综合运用。",
        DifficultyLevel::Harder => "难度：困难，需要综合多个知识点，接近压轴题水平。",
    }
}

fn difficulty_en(difficulty: DifficultyLevel) -> &'static str {
    match difficulty {
        DifficultyLevel::Easy => "Difficulty: easy, more basic than the original, for reinforcing the concept.",
        DifficultyLevel::Medium => "Difficulty: medium, about as hard as the original.",
        DifficultyLevel::Hard => "Difficulty: hard, one more reasoning step or combined technique than the original.",
        DifficultyLevel::Harder => {
            "Difficulty: harder, combining several knowledge points at the level of a final exam question."
        }
    }
}
