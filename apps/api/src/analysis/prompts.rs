// Prompt template for the ATS analysis call.
// The two section markers are a contract with `sections.rs`: the model is told
// to answer in exactly this shape, and the response is split on them.

pub const ANALYSIS_MARKER: &str = "---BEGIN_ANALYSIS---";
pub const LATEX_MARKER: &str = "---BEGIN_LATEX---";

/// Fixed instructions preceding the job description and resume.
/// Contains `ANALYSIS_MARKER` then `LATEX_MARKER`, in that order.
pub const ATS_ANALYSIS_INSTRUCTIONS: &str = r#"I need you to act as an expert ATS (Applicant Tracking System) analyzer and resume consultant. 
Please review my resume thoroughly in comparison with my target job description and provide:

**PRELIMINARY RESEARCH STEP:**
Before analyzing the resume, search and analyze the target job role on hiring websites (LinkedIn Jobs, Indeed, Glassdoor, etc.) to understand:
- Common job titles used in the industry for this role
- Standard responsibilities and requirements
- Typical career progression paths
- Technology stacks and tools commonly mentioned
- Skill requirements at different experience levels
- How similar roles are described across different companies

Use these insights as additional context alongside the provided job description to ensure recommendations are industry-aligned and realistic.

1. ATS Score Analysis:
- Give me an overall ATS compatibility score out of 100
- Explain the scoring methodology used
- Identify any formatting or structural issues that might cause ATS rejection
- Check for proper use of keywords, standard section headings, and machine-readable format

2. Job Description Match Analysis:
- Calculate a match percentage between my resume and the job description
- List the key requirements from the job description and indicate which ones my resume addresses
- Identify critical keywords from the job description that are missing in my resume
- Highlight skills and qualifications mentioned in the job description that I should emphasize more
- Point out any gaps between what the job requires and what my resume shows

3. Detailed Section-by-Section Breakdown:
For each section of my resume (Summary/Objective, Work Experience, Skills, Certifications, Projects, etc.), provide:
- Good Points: What's working well in this section
- Points to Improve: What needs enhancement (metrics, vague statements, etc.)
- Points to Add: What's missing that should be included
- Update job titles, roles, and responsibilities to match the target role. 
- Emphasize transferable skills, tools, and responsibilities.

Strict Constraints (Do NOT modify):
- Education details
- Company names
- Employment dates (from/to)

**JOB TITLE MODIFICATION RULES:**
- ONLY use real-world, industry-standard job titles that actually exist in the market
- DO NOT create hybrid or made-up titles by combining multiple role names
- DO NOT add supplementary titles alongside existing titles
- Adjust job titles to commonly recognized alternatives that accurately reflect the responsibilities
- Verify job title legitimacy through your preliminary research on hiring websites
- Example ACCEPTABLE changes: "Software Developer" → "Software Engineer", "Programmer" → "Backend Developer"
- Example UNACCEPTABLE changes: "Software Developer" → "AI Software Developer Engineer", "Developer" → "Developer & ML Engineer"
- If current title is already industry-standard, keep it unchanged
- Job title should match what would appear on LinkedIn or Indeed for similar responsibilities

**CRITICAL CHRONOLOGICAL CONSISTENCY RULE:**
- **ONLY mention technologies, tools, frameworks, practices, or methodologies that were actually available and in use during the specific timeframe of each role**
- For roles from 2015-2017: Do NOT add modern AI tools (ChatGPT, LLMs, Stable Diffusion, etc.), modern cloud services, or frameworks that didn't exist then
- Respect the realistic career progression arc for the target role (e.g., an AI Engineer in 2026 likely started with traditional ML/data science in 2015-2017, then evolved through deep learning, cloud ML, and finally to LLMs/GenAI)
- For each experience period, verify that mentioned tools/technologies were available during those years
- Show natural skill evolution: foundational skills in early roles → intermediate technologies in mid-career → cutting-edge tools in recent roles
- Example: 2015-2017 role should mention Python, scikit-learn, traditional ML, basic neural networks; NOT transformer models, LangChain, or GPT APIs
- Cross-reference with your preliminary hiring website research to understand what technologies were standard for this role during each time period

Allowed Modifications:
- Job titles (adjust to industry-standard titles only, following rules above)
- Bullet points, Responsibilities, Achievements, Tools/tech stack wording (must be period-appropriate)
- Summary

4. Keyword Optimization:
- List the top 10-15 keywords from the job description AND from your hiring website research
- Show how many times each keyword appears in my resume
- Suggest where and how to naturally incorporate missing keywords **while respecting chronological constraints**
- For older roles, show how foundational versions of modern skills can be emphasized
- Prioritize keywords that appear frequently across multiple job postings for this role

5. Content Alignment Recommendations:
- Which experiences should I emphasize more?
- What achievements should I add or modify?
- Any irrelevant sections to minimize?
- **How to demonstrate career progression that naturally leads to the target role**
- How does the resume compare to industry standards found in your research?

6. Overall Strategy:
- Summary of top 3-5 changes to improve chances
- Formatting improvements for better ATS parsing
- **Career narrative that shows logical progression to current expertise**
- Industry insights from hiring website research and how to leverage them
- Final recommendations for tailoring this resume

7. Rewrite my resume:
- Provide the content for every section.
- Incorporate every modification suggested.
- **Use only real-world, industry-standard job titles verified through research**
- **Ensure all technologies/tools mentioned are chronologically accurate**
- **Show clear skill evolution from early career to present**
- **Align with industry standards observed in hiring website research**
- Please be specific with examples and provide actionable feedback

STRICT OUTPUT FORMAT:
- Strictly Stick to the LaTeX format i pasted. Not even change any indentation or formatting.
- Do not include any asterisks in the Output LaTeX code.
- You must return your response in exactly this format, using these specific headers:

---BEGIN_ANALYSIS---
# Changes Made
[Insert your detailed analysis, scores, and tables here in Markdown format]

---BEGIN_LATEX---
[Insert ONLY the raw LaTeX code here]

"#;

/// Composes the analysis prompt. Both inputs are embedded verbatim, once, after
/// the instructions; nothing inside them is interpreted or re-expanded.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{ATS_ANALYSIS_INSTRUCTIONS}JOB DESCRIPTION:\n{job_description}\n\nLATEX RESUME CONTENT:\n{resume_text}\n"
    )
}
